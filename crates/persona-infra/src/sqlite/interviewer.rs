//! SQLite interviewer repository implementation.
//!
//! Implements `InterviewerRepository` from `persona-core` using sqlx with
//! split read/write pools. Mutations use `RETURNING *` so callers get the
//! affected rows back in the same statement.

use chrono::{DateTime, Utc};
use persona_core::repository::interviewer::InterviewerRepository;
use persona_types::error::RepositoryError;
use persona_types::interviewer::{Interviewer, InterviewerId, InterviewerPatch, NewInterviewer};
use sqlx::{QueryBuilder, Row, Sqlite};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `InterviewerRepository`.
pub struct SqliteInterviewerRepository {
    pool: DatabasePool,
}

impl SqliteInterviewerRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Interviewer.
struct InterviewerRow {
    id: i64,
    created_at: String,
    name: String,
    empathy: i32,
    rapport: i32,
    exploration: i32,
    speed: i32,
    image: String,
    description: Option<String>,
    audio: Option<String>,
    agent_id: Option<String>,
}

impl InterviewerRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            name: row.try_get("name")?,
            empathy: row.try_get("empathy")?,
            rapport: row.try_get("rapport")?,
            exploration: row.try_get("exploration")?,
            speed: row.try_get("speed")?,
            image: row.try_get("image")?,
            description: row.try_get("description")?,
            audio: row.try_get("audio")?,
            agent_id: row.try_get("agent_id")?,
        })
    }

    fn into_interviewer(self) -> Result<Interviewer, RepositoryError> {
        Ok(Interviewer {
            id: InterviewerId(self.id),
            created_at: parse_datetime(&self.created_at)?,
            name: self.name,
            empathy: self.empathy,
            rapport: self.rapport,
            exploration: self.exploration,
            speed: self.speed,
            image: self.image,
            description: self.description,
            audio: self.audio,
            agent_id: self.agent_id,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn map_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Interviewer>, RepositoryError> {
    rows.iter()
        .map(|row| {
            InterviewerRow::from_row(row)
                .map_err(|e| RepositoryError::Query(e.to_string()))?
                .into_interviewer()
        })
        .collect()
}

fn query_error(e: sqlx::Error) -> RepositoryError {
    match e {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => RepositoryError::Connection,
        other => RepositoryError::Query(other.to_string()),
    }
}

impl InterviewerRepository for SqliteInterviewerRepository {
    async fn list(&self) -> Result<Vec<Interviewer>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM interviewer ORDER BY id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        map_rows(&rows)
    }

    async fn get_by_id(&self, id: InterviewerId) -> Result<Option<Interviewer>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM interviewer WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let interviewer_row = InterviewerRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(interviewer_row.into_interviewer()?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_name_and_agent(
        &self,
        name: &str,
        agent_id: Option<&str>,
    ) -> Result<Option<Interviewer>, RepositoryError> {
        // `IS` so that a missing agent id matches NULL columns.
        let row = sqlx::query("SELECT * FROM interviewer WHERE name = ? AND agent_id IS ? LIMIT 1")
            .bind(name)
            .bind(agent_id)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let interviewer_row = InterviewerRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(interviewer_row.into_interviewer()?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, new: &NewInterviewer) -> Result<Interviewer, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO interviewer (created_at, name, empathy, rapport, exploration, speed, image, description, audio, agent_id)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(format_datetime(&Utc::now()))
        .bind(&new.name)
        .bind(new.empathy)
        .bind(new.rapport)
        .bind(new.exploration)
        .bind(new.speed)
        .bind(&new.image)
        .bind(&new.description)
        .bind(&new.audio)
        .bind(&new.agent_id)
        .fetch_one(&self.pool.writer)
        .await
        .map_err(query_error)?;

        InterviewerRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_interviewer()
    }

    async fn update(
        &self,
        id: InterviewerId,
        patch: &InterviewerPatch,
    ) -> Result<Vec<Interviewer>, RepositoryError> {
        if patch.is_empty() {
            return Ok(self.get_by_id(id).await?.into_iter().collect());
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE interviewer SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(empathy) = patch.empathy {
                set.push("empathy = ").push_bind_unseparated(empathy);
            }
            if let Some(rapport) = patch.rapport {
                set.push("rapport = ").push_bind_unseparated(rapport);
            }
            if let Some(exploration) = patch.exploration {
                set.push("exploration = ").push_bind_unseparated(exploration);
            }
            if let Some(speed) = patch.speed {
                set.push("speed = ").push_bind_unseparated(speed);
            }
            if let Some(image) = &patch.image {
                set.push("image = ").push_bind_unseparated(image.clone());
            }
            if let Some(description) = &patch.description {
                set.push("description = ").push_bind_unseparated(description.clone());
            }
            if let Some(audio) = &patch.audio {
                set.push("audio = ").push_bind_unseparated(audio.clone());
            }
            if let Some(agent_id) = &patch.agent_id {
                set.push("agent_id = ").push_bind_unseparated(agent_id.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id.0).push(" RETURNING *");

        let rows = qb
            .build()
            .fetch_all(&self.pool.writer)
            .await
            .map_err(query_error)?;

        map_rows(&rows)
    }

    async fn delete(&self, id: InterviewerId) -> Result<Vec<Interviewer>, RepositoryError> {
        let rows = sqlx::query("DELETE FROM interviewer WHERE id = ? RETURNING *")
            .bind(id.0)
            .fetch_all(&self.pool.writer)
            .await
            .map_err(query_error)?;

        map_rows(&rows)
    }
}
