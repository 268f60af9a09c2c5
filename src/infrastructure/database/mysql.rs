//! MythTV MySQL database adapter

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tracing::{debug, info};

use crate::application::ports::{DatabaseError, RecorderDatabase};
use crate::domain::channel::CommMethod;
use crate::domain::config::DatabaseConfig;
use crate::domain::job::{JobId, JobState, JobStatus, RecordingInfo, RecordingKey, StartTime};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Job queue, recording, channel, and storage group tables
pub struct MythDatabase {
    pool: MySqlPool,
}

impl MythDatabase {
    /// Connect using settings from `config.xml`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::Connection(e.to_string()))?;

        info!(host = %config.host, database = %config.database, "connected to MythTV database");
        Ok(Self { pool })
    }
}

fn query_error(e: sqlx::Error) -> DatabaseError {
    DatabaseError::Query(e.to_string())
}

#[async_trait]
impl RecorderDatabase for MythDatabase {
    async fn job_recording(&self, job: JobId) -> Result<RecordingKey, DatabaseError> {
        let row: Option<(u32, NaiveDateTime)> =
            sqlx::query_as("SELECT chanid, starttime FROM jobqueue WHERE id = ?")
                .bind(job.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(query_error)?;

        let (chanid, starttime) = row.ok_or_else(|| DatabaseError::NotFound(format!("job {}", job)))?;
        Ok(RecordingKey {
            chanid,
            starttime: StartTime::from_naive_utc(starttime),
        })
    }

    async fn recording_info(&self, key: &RecordingKey) -> Result<RecordingInfo, DatabaseError> {
        // Old recordings can outlive their channel row.
        let row: Option<(String, String, String, String, Option<String>, Option<i32>)> =
            sqlx::query_as(
                "SELECT r.basename, r.storagegroup, r.title, r.subtitle, c.callsign, c.commmethod \
                 FROM recorded r LEFT JOIN channel c ON c.chanid = r.chanid \
                 WHERE r.chanid = ? AND r.starttime = ?",
            )
            .bind(key.chanid)
            .bind(key.starttime.as_naive_utc())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        let (basename, storage_group, title, subtitle, callsign, comm_method) =
            row.ok_or_else(|| DatabaseError::NotFound(format!("recording {}", key)))?;

        Ok(RecordingInfo {
            key: *key,
            basename,
            storage_group,
            title,
            subtitle,
            callsign: callsign.unwrap_or_default(),
            comm_method: CommMethod::from_raw(comm_method),
        })
    }

    async fn storage_roots(&self, group: &str) -> Result<Vec<PathBuf>, DatabaseError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT dirname FROM storagegroup WHERE groupname = ? ORDER BY id")
                .bind(group)
                .fetch_all(&self.pool)
                .await
                .map_err(query_error)?;

        debug!(group, count = rows.len(), "storage group directories");
        Ok(rows.into_iter().map(|(dir,)| PathBuf::from(dir)).collect())
    }

    async fn set_flag_state(
        &self,
        key: &RecordingKey,
        state: JobState,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE recorded SET commflagged = ? WHERE chanid = ? AND starttime = ?")
            .bind(state.commflagged())
            .bind(key.chanid)
            .bind(key.starttime.as_naive_utc())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        Ok(())
    }

    async fn update_job(
        &self,
        job: JobId,
        status: JobStatus,
        comment: &str,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE jobqueue SET status = ?, comment = ?, statustime = NOW() WHERE id = ?")
            .bind(status.code())
            .bind(comment)
            .bind(job.0)
            .execute(&self.pool)
            .await
            .map_err(query_error)?;
        debug!(%job, %status, comment, "job status updated");
        Ok(())
    }
}
