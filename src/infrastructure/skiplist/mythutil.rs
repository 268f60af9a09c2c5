//! Skip list writer backed by MythTV's `mythutil`

use async_trait::async_trait;
use tracing::info;

use crate::application::ports::{SkipListError, SkipListWriter};
use crate::domain::cutlist::Cutlist;
use crate::domain::job::RecordingKey;
use crate::infrastructure::process::ToolRunner;

/// Writes skip lists with `mythutil --setskiplist` / `--clearskiplist`
pub struct MythutilSkipList {
    runner: ToolRunner,
}

impl MythutilSkipList {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    fn args(key: &RecordingKey, cutlist: &Cutlist) -> Vec<String> {
        let mut args = vec![
            format!("--chanid={}", key.chanid),
            format!("--starttime={}", key.starttime),
        ];
        if cutlist.is_empty() {
            args.push("--clearskiplist".to_string());
        } else {
            args.push("--setskiplist".to_string());
            args.push(cutlist.as_str().to_string());
        }
        args
    }
}

#[async_trait]
impl SkipListWriter for MythutilSkipList {
    async fn write_skiplist(
        &self,
        key: &RecordingKey,
        cutlist: &Cutlist,
    ) -> Result<(), SkipListError> {
        let output = self.runner.run(Self::args(key, cutlist)).await?;

        if !output.status.success() {
            return Err(SkipListError::Rejected {
                code: output.code(),
                message: output.stderr_tail().to_string(),
            });
        }
        info!(%key, "skip list written");
        Ok(())
    }
}
