//! Database repository for CRUD operations.
//!
//! Uses prepared statements and transactions for data integrity.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateCommentRequest, CreateFeatureRequest, CreateLabelRequest, CreateReportRequest,
    CreateTagRequest, CreateTeamRequest, CreateUserRequest, FeatureComment, FeatureRequest,
    MetricSet, PersonalLabel, PlayerStatus, ReadinessReport, RequestStatus, RequestType, Role,
    SetStatusRequest, Team, TeamSchedule, TeamTag, UpdateLabelRequest, UpdateReportRequest,
    UpdateTagRequest, UpdateTeamRequest, UpdateUserRequest, UpvoteResult, User,
};
use crate::readiness::{join_code, score};

/// Athlete ids attached to a team, via the primary team reference or a
/// membership row. Takes two binds of the same team id.
const TEAM_ATHLETE_IDS: &str = "SELECT p.user_id FROM profiles p \
     WHERE p.role = 'ATHLETE' AND p.team_id = ? \
     UNION \
     SELECT m.user_id FROM team_memberships m \
     JOIN profiles p2 ON p2.user_id = m.user_id \
     WHERE p2.role = 'ATHLETE' AND m.team_id = ?";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Create a user account together with its profile (and the optional
    /// initial team membership) in a single transaction.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, AppError> {
        if let Some(team_id) = &request.team_id {
            if self.get_team(team_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Team {} not found", team_id)));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let timezone = request.timezone.clone().unwrap_or_else(|| "UTC".to_string());

        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO users (id, username, email, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.username)
        .bind(&request.email)
        .bind(&now)
        .execute(&mut *tx)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "Username {} is already taken",
                    request.username
                )));
            }
            return Err(err.into());
        }

        sqlx::query(
            "INSERT INTO profiles (user_id, role, team_id, current_status, status_note, status_updated_at, timezone, daily_reminder_enabled) \
             VALUES (?, ?, ?, 'AVAILABLE', '', ?, ?, 1)",
        )
        .bind(&id)
        .bind(request.role.as_str())
        .bind(&request.team_id)
        .bind(&now)
        .bind(&timezone)
        .execute(&mut *tx)
        .await?;

        if let Some(team_id) = &request.team_id {
            sqlx::query(
                "INSERT OR IGNORE INTO team_memberships (user_id, team_id) VALUES (?, ?)",
            )
            .bind(&id)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_user(&id)
            .await?
            .ok_or_else(|| AppError::Internal("User vanished after insert".to_string()))
    }

    /// Get a user with its profile and memberships.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT u.id, u.username, u.email, u.created_at, p.role, p.team_id, \
                    p.current_status, p.status_note, p.status_updated_at, p.timezone, \
                    p.daily_reminder_enabled \
             FROM users u JOIN profiles p ON p.user_id = u.id WHERE u.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let team_ids = self.membership_team_ids(id).await?;
        Ok(Some(user_from_row(&row, team_ids)))
    }

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query(
            "SELECT u.id, u.username, u.email, u.created_at, p.role, p.team_id, \
                    p.current_status, p.status_note, p.status_updated_at, p.timezone, \
                    p.daily_reminder_enabled \
             FROM users u JOIN profiles p ON p.user_id = u.id ORDER BY u.username",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut memberships: HashMap<String, Vec<String>> = HashMap::new();
        let membership_rows =
            sqlx::query("SELECT user_id, team_id FROM team_memberships ORDER BY team_id")
                .fetch_all(&self.pool)
                .await?;
        for row in membership_rows {
            memberships
                .entry(row.get("user_id"))
                .or_default()
                .push(row.get("team_id"));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id: String = row.get("id");
                let team_ids = memberships.remove(&id).unwrap_or_default();
                user_from_row(&row, team_ids)
            })
            .collect())
    }

    /// Update account and profile settings.
    pub async fn update_user(
        &self,
        id: &str,
        request: &UpdateUserRequest,
    ) -> Result<User, AppError> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

        if let Some(team_id) = &request.team_id {
            if self.get_team(team_id).await?.is_none() {
                return Err(AppError::NotFound(format!("Team {} not found", team_id)));
            }
        }

        let email = request.email.clone().or(existing.email.clone());
        let team_id = request.team_id.clone().or(existing.team_id.clone());
        let timezone = request.timezone.clone().unwrap_or(existing.timezone);
        let reminder = request
            .daily_reminder_enabled
            .unwrap_or(existing.daily_reminder_enabled);

        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET email = ? WHERE id = ?")
            .bind(&email)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "UPDATE profiles SET team_id = ?, timezone = ?, daily_reminder_enabled = ? WHERE user_id = ?",
        )
        .bind(&team_id)
        .bind(&timezone)
        .bind(reminder as i32)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if let Some(team) = &request.team_id {
            sqlx::query(
                "INSERT OR IGNORE INTO team_memberships (user_id, team_id) VALUES (?, ?)",
            )
            .bind(id)
            .bind(team)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_user(id)
            .await?
            .ok_or_else(|| AppError::Internal("User vanished after update".to_string()))
    }

    /// Set an athlete's availability status.
    pub async fn set_user_status(
        &self,
        id: &str,
        request: &SetStatusRequest,
    ) -> Result<User, AppError> {
        let now = Utc::now().to_rfc3339();
        let note = request.note.clone().unwrap_or_default();

        let result = sqlx::query(
            "UPDATE profiles SET current_status = ?, status_note = ?, status_updated_at = ? WHERE user_id = ?",
        )
        .bind(request.status.as_str())
        .bind(&note)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        self.get_user(id)
            .await?
            .ok_or_else(|| AppError::Internal("User vanished after update".to_string()))
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }

    /// Athletes attached to a team (primary team or membership).
    pub async fn list_team_athletes(&self, team_id: &str) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT u.id, u.username, u.email, u.created_at, p.role, p.team_id, \
                    p.current_status, p.status_note, p.status_updated_at, p.timezone, \
                    p.daily_reminder_enabled \
             FROM users u JOIN profiles p ON p.user_id = u.id \
             WHERE u.id IN ({}) ORDER BY u.username",
            TEAM_ATHLETE_IDS
        );
        let rows = sqlx::query(&sql)
            .bind(team_id)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let team_ids = self.membership_team_ids(&id).await?;
            users.push(user_from_row(&row, team_ids));
        }
        Ok(users)
    }

    async fn membership_team_ids(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let rows = sqlx::query(
            "SELECT team_id FROM team_memberships WHERE user_id = ? ORDER BY team_id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.get("team_id")).collect())
    }

    // ==================== TEAM OPERATIONS ====================

    /// Create a team with a freshly generated join code.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> Result<Team, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let target = request.target_readiness.unwrap_or(100);
        let code = self.generate_join_code().await?;

        let inserted = sqlx::query(
            "INSERT INTO teams (id, name, join_code, target_readiness, logo_display_mode, background_opacity, background_position, created_at) \
             VALUES (?, ?, ?, ?, 'NONE', 0.05, 'CENTER', ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&code)
        .bind(target as i64)
        .bind(&now)
        .execute(&self.pool)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "Team name {} is already taken",
                    request.name
                )));
            }
            return Err(err.into());
        }

        self.get_team(&id)
            .await?
            .ok_or_else(|| AppError::Internal("Team vanished after insert".to_string()))
    }

    /// Draw a code that collides with no existing team.
    async fn generate_join_code(&self) -> Result<String, AppError> {
        let rows = sqlx::query("SELECT join_code FROM teams")
            .fetch_all(&self.pool)
            .await?;
        let taken: HashSet<String> = rows.into_iter().map(|r| r.get("join_code")).collect();

        let mut rng = rand::thread_rng();
        join_code::generate_unique(&mut rng, |code| taken.contains(code))
    }

    /// Get a team by ID.
    pub async fn get_team(&self, id: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, join_code, target_readiness, logo_path, logo_display_mode, \
                    background_opacity, background_position, created_at \
             FROM teams WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// List all teams.
    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, join_code, target_readiness, logo_path, logo_display_mode, \
                    background_opacity, background_position, created_at \
             FROM teams ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(team_from_row).collect())
    }

    /// Look up the team owning a join code. The code must already be in
    /// canonical (validated) form.
    pub async fn find_team_by_join_code(&self, code: &str) -> Result<Option<Team>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, join_code, target_readiness, logo_path, logo_display_mode, \
                    background_opacity, background_position, created_at \
             FROM teams WHERE join_code = ?",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(team_from_row))
    }

    /// Update a team's settings and branding.
    pub async fn update_team(
        &self,
        id: &str,
        request: &UpdateTeamRequest,
    ) -> Result<Team, AppError> {
        let existing = self
            .get_team(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let target = request.target_readiness.unwrap_or(existing.target_readiness);
        let display_mode = request
            .logo_display_mode
            .unwrap_or(existing.logo_display_mode);
        let opacity = request
            .background_opacity
            .unwrap_or(existing.background_opacity);
        let position = request
            .background_position
            .unwrap_or(existing.background_position);

        let updated = sqlx::query(
            "UPDATE teams SET name = ?, target_readiness = ?, logo_display_mode = ?, \
                    background_opacity = ?, background_position = ? WHERE id = ?",
        )
        .bind(name)
        .bind(target as i64)
        .bind(display_mode.as_str())
        .bind(opacity)
        .bind(position.as_str())
        .bind(id)
        .execute(&self.pool)
        .await;

        if let Err(err) = updated {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "Team name {} is already taken",
                    name
                )));
            }
            return Err(err.into());
        }

        self.get_team(id)
            .await?
            .ok_or_else(|| AppError::Internal("Team vanished after update".to_string()))
    }

    /// Record the stored logo path after a successful upload.
    pub async fn set_team_logo(&self, id: &str, logo_path: &str) -> Result<Team, AppError> {
        let result = sqlx::query("UPDATE teams SET logo_path = ? WHERE id = ?")
            .bind(logo_path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        self.get_team(id)
            .await?
            .ok_or_else(|| AppError::Internal("Team vanished after update".to_string()))
    }

    /// Replace the team's join code with a new unique one. The old code
    /// stops working immediately.
    pub async fn regenerate_join_code(&self, id: &str) -> Result<Team, AppError> {
        let code = self.generate_join_code().await?;

        let result = sqlx::query("UPDATE teams SET join_code = ? WHERE id = ?")
            .bind(&code)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }

        self.get_team(id)
            .await?
            .ok_or_else(|| AppError::Internal("Team vanished after update".to_string()))
    }

    /// Delete a team. Tags, schedule and memberships cascade; profiles
    /// detach via SET NULL.
    pub async fn delete_team(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }

    /// Enroll a user into a team: membership row plus the primary team
    /// reference when the user has none yet.
    pub async fn join_team(&self, team_id: &str, user_id: &str) -> Result<User, AppError> {
        let user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR IGNORE INTO team_memberships (user_id, team_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        if user.team_id.is_none() {
            sqlx::query("UPDATE profiles SET team_id = ? WHERE user_id = ?")
                .bind(team_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::Internal("User vanished after join".to_string()))
    }

    // ==================== TAG OPERATIONS ====================

    /// List a team's tags.
    pub async fn list_tags(&self, team_id: &str) -> Result<Vec<TeamTag>, AppError> {
        let rows = sqlx::query(
            "SELECT id, team_id, name, target_min, target_max, color \
             FROM team_tags WHERE team_id = ? ORDER BY name",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(tag_from_row).collect())
    }

    /// Get a tag scoped to its owning team.
    pub async fn get_tag(&self, team_id: &str, tag_id: &str) -> Result<Option<TeamTag>, AppError> {
        let row = sqlx::query(
            "SELECT id, team_id, name, target_min, target_max, color \
             FROM team_tags WHERE id = ? AND team_id = ?",
        )
        .bind(tag_id)
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(tag_from_row))
    }

    /// Create a tag for a team.
    pub async fn create_tag(
        &self,
        team_id: &str,
        request: &CreateTagRequest,
    ) -> Result<TeamTag, AppError> {
        if self.get_team(team_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Team {} not found", team_id)));
        }
        validate_target_range(request.target_min, request.target_max)?;

        let id = uuid::Uuid::new_v4().to_string();

        let inserted = sqlx::query(
            "INSERT INTO team_tags (id, team_id, name, target_min, target_max, color) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(team_id)
        .bind(&request.name)
        .bind(request.target_min as i64)
        .bind(request.target_max as i64)
        .bind(&request.color)
        .execute(&self.pool)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "Tag name {} already exists for this team",
                    request.name
                )));
            }
            return Err(err.into());
        }

        Ok(TeamTag {
            id,
            team_id: team_id.to_string(),
            name: request.name.clone(),
            target_min: request.target_min,
            target_max: request.target_max,
            color: request.color.clone(),
        })
    }

    /// Update a tag.
    pub async fn update_tag(
        &self,
        team_id: &str,
        tag_id: &str,
        request: &UpdateTagRequest,
    ) -> Result<TeamTag, AppError> {
        let existing = self
            .get_tag(team_id, tag_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tag {} not found", tag_id)))?;

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let target_min = request.target_min.unwrap_or(existing.target_min);
        let target_max = request.target_max.unwrap_or(existing.target_max);
        let color = request.color.as_ref().unwrap_or(&existing.color);
        validate_target_range(target_min, target_max)?;

        let updated = sqlx::query(
            "UPDATE team_tags SET name = ?, target_min = ?, target_max = ?, color = ? \
             WHERE id = ? AND team_id = ?",
        )
        .bind(name)
        .bind(target_min as i64)
        .bind(target_max as i64)
        .bind(color)
        .bind(tag_id)
        .bind(team_id)
        .execute(&self.pool)
        .await;

        if let Err(err) = updated {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "Tag name {} already exists for this team",
                    name
                )));
            }
            return Err(err.into());
        }

        Ok(TeamTag {
            id: tag_id.to_string(),
            team_id: team_id.to_string(),
            name: name.clone(),
            target_min,
            target_max,
            color: color.clone(),
        })
    }

    /// Delete a tag and purge it from the team schedule's mappings in the
    /// same transaction, so no dangling reference survives the delete.
    pub async fn delete_tag(&self, team_id: &str, tag_id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM team_tags WHERE id = ? AND team_id = ?")
            .bind(tag_id)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tag {} not found", tag_id)));
        }

        let schedule_row = sqlx::query(
            "SELECT team_id, weekly_pattern, date_overrides, created_at, updated_at \
             FROM team_schedules WHERE team_id = ?",
        )
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(row) = schedule_row {
            let mut schedule = schedule_from_row(&row)?;
            schedule.purge_tag(tag_id);
            let now = Utc::now().to_rfc3339();
            sqlx::query(
                "UPDATE team_schedules SET weekly_pattern = ?, date_overrides = ?, updated_at = ? \
                 WHERE team_id = ?",
            )
            .bind(serde_json::to_string(&schedule.weekly_pattern)?)
            .bind(serde_json::to_string(&schedule.date_overrides)?)
            .bind(&now)
            .bind(team_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    // ==================== SCHEDULE OPERATIONS ====================

    /// Get a team's schedule, creating an empty one on first access.
    pub async fn get_or_create_schedule(&self, team_id: &str) -> Result<TeamSchedule, AppError> {
        if self.get_team(team_id).await?.is_none() {
            return Err(AppError::NotFound(format!("Team {} not found", team_id)));
        }

        let row = sqlx::query(
            "SELECT team_id, weekly_pattern, date_overrides, created_at, updated_at \
             FROM team_schedules WHERE team_id = ?",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return schedule_from_row(&row);
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT OR IGNORE INTO team_schedules (team_id, weekly_pattern, date_overrides, created_at, updated_at) \
             VALUES (?, '{}', '{}', ?, ?)",
        )
        .bind(team_id)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        let row = sqlx::query(
            "SELECT team_id, weekly_pattern, date_overrides, created_at, updated_at \
             FROM team_schedules WHERE team_id = ?",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;
        schedule_from_row(&row)
    }

    /// Assign (or clear) the tag for a date or weekday.
    ///
    /// A referenced tag must belong to the same team; anything else is a
    /// `TagOwnershipMismatch` rejected before the write.
    pub async fn set_day_tag(
        &self,
        team_id: &str,
        date: Option<NaiveDate>,
        weekday: Option<crate::models::Weekday>,
        tag_id: Option<String>,
    ) -> Result<TeamSchedule, AppError> {
        if let Some(tag_id) = &tag_id {
            if self.get_tag(team_id, tag_id).await?.is_none() {
                return Err(AppError::TagOwnershipMismatch(format!(
                    "Tag {} does not belong to this team",
                    tag_id
                )));
            }
        }

        let mut schedule = self.get_or_create_schedule(team_id).await?;
        match (date, weekday) {
            (Some(date), None) => schedule.set_date_tag(date, tag_id),
            (None, Some(weekday)) => schedule.set_weekday_tag(weekday, tag_id),
            _ => {
                return Err(AppError::Validation(
                    "Exactly one of date or weekday is required".to_string(),
                ));
            }
        }

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "UPDATE team_schedules SET weekly_pattern = ?, date_overrides = ?, updated_at = ? \
             WHERE team_id = ?",
        )
        .bind(serde_json::to_string(&schedule.weekly_pattern)?)
        .bind(serde_json::to_string(&schedule.date_overrides)?)
        .bind(&now)
        .bind(team_id)
        .execute(&self.pool)
        .await?;

        schedule.updated_at = now;
        Ok(schedule)
    }

    // ==================== REPORT OPERATIONS ====================

    /// Store a daily report, deriving the readiness score server-side.
    pub async fn create_report(
        &self,
        request: &CreateReportRequest,
        report_date: NaiveDate,
    ) -> Result<ReadinessReport, AppError> {
        let athlete = self
            .get_user(&request.athlete_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User {} not found", request.athlete_id))
            })?;
        if athlete.role != Role::Athlete {
            return Err(AppError::Validation(
                "Only athletes can submit readiness reports".to_string(),
            ));
        }

        if self
            .get_report_for_day(&request.athlete_id, report_date)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "A report for {} already exists",
                report_date
            )));
        }

        let readiness_score = score::readiness_score(&request.metrics)?;
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let m = &request.metrics;

        let inserted = sqlx::query(
            "INSERT INTO readiness_reports (id, athlete_id, report_date, sleep_quality, energy_fatigue, \
                    muscle_soreness, mood_stress, motivation, nutrition_quality, hydration, \
                    readiness_score, comments, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.athlete_id)
        .bind(report_date)
        .bind(m.sleep_quality as i64)
        .bind(m.energy_fatigue as i64)
        .bind(m.muscle_soreness as i64)
        .bind(m.mood_stress as i64)
        .bind(m.motivation as i64)
        .bind(m.nutrition_quality as i64)
        .bind(m.hydration as i64)
        .bind(readiness_score as i64)
        .bind(&request.comments)
        .bind(&now)
        .execute(&self.pool)
        .await;

        if let Err(err) = inserted {
            // UNIQUE (athlete_id, report_date) backstops the pre-check
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "A report for {} already exists",
                    report_date
                )));
            }
            return Err(err.into());
        }

        Ok(ReadinessReport {
            id,
            athlete_id: request.athlete_id.clone(),
            report_date,
            metrics: request.metrics,
            readiness_score,
            comments: request.comments.clone(),
            created_at: now,
        })
    }

    /// Get a report by ID.
    pub async fn get_report(&self, id: &str) -> Result<Option<ReadinessReport>, AppError> {
        let row = sqlx::query(
            "SELECT id, athlete_id, report_date, sleep_quality, energy_fatigue, muscle_soreness, \
                    mood_stress, motivation, nutrition_quality, hydration, readiness_score, \
                    comments, created_at \
             FROM readiness_reports WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(report_from_row))
    }

    /// Get an athlete's report for a specific day.
    pub async fn get_report_for_day(
        &self,
        athlete_id: &str,
        date: NaiveDate,
    ) -> Result<Option<ReadinessReport>, AppError> {
        let row = sqlx::query(
            "SELECT id, athlete_id, report_date, sleep_quality, energy_fatigue, muscle_soreness, \
                    mood_stress, motivation, nutrition_quality, hydration, readiness_score, \
                    comments, created_at \
             FROM readiness_reports WHERE athlete_id = ? AND report_date = ?",
        )
        .bind(athlete_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(report_from_row))
    }

    /// Correct a report's metrics; the score is recomputed from the merged
    /// values, never taken from the client.
    pub async fn update_report(
        &self,
        id: &str,
        request: &UpdateReportRequest,
    ) -> Result<ReadinessReport, AppError> {
        let existing = self
            .get_report(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        let metrics = request.merged_metrics(&existing.metrics);
        let readiness_score = score::readiness_score(&metrics)?;
        let comments = request.comments.clone().or(existing.comments.clone());

        sqlx::query(
            "UPDATE readiness_reports SET sleep_quality = ?, energy_fatigue = ?, muscle_soreness = ?, \
                    mood_stress = ?, motivation = ?, nutrition_quality = ?, hydration = ?, \
                    readiness_score = ?, comments = ? WHERE id = ?",
        )
        .bind(metrics.sleep_quality as i64)
        .bind(metrics.energy_fatigue as i64)
        .bind(metrics.muscle_soreness as i64)
        .bind(metrics.mood_stress as i64)
        .bind(metrics.motivation as i64)
        .bind(metrics.nutrition_quality as i64)
        .bind(metrics.hydration as i64)
        .bind(readiness_score as i64)
        .bind(&comments)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(ReadinessReport {
            metrics,
            readiness_score,
            comments,
            ..existing
        })
    }

    /// Delete a report (explicit management action only; reports are never
    /// removed automatically).
    pub async fn delete_report(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM readiness_reports WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Report {} not found", id)));
        }
        Ok(())
    }

    /// An athlete's reports within a date range, oldest first.
    pub async fn list_reports(
        &self,
        athlete_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ReadinessReport>, AppError> {
        let rows = sqlx::query(
            "SELECT id, athlete_id, report_date, sleep_quality, energy_fatigue, muscle_soreness, \
                    mood_stress, motivation, nutrition_quality, hydration, readiness_score, \
                    comments, created_at \
             FROM readiness_reports WHERE athlete_id = ? AND report_date >= ? AND report_date <= ? \
             ORDER BY report_date",
        )
        .bind(athlete_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(report_from_row).collect())
    }

    /// All of a team's athlete reports for one date.
    pub async fn team_reports_for_date(
        &self,
        team_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<ReadinessReport>, AppError> {
        let sql = format!(
            "SELECT id, athlete_id, report_date, sleep_quality, energy_fatigue, muscle_soreness, \
                    mood_stress, motivation, nutrition_quality, hydration, readiness_score, \
                    comments, created_at \
             FROM readiness_reports WHERE report_date = ? AND athlete_id IN ({})",
            TEAM_ATHLETE_IDS
        );
        let rows = sqlx::query(&sql)
            .bind(date)
            .bind(team_id)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(report_from_row).collect())
    }

    /// Average team readiness over a date range, if any report exists.
    pub async fn team_average(
        &self,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Option<f64>, AppError> {
        let sql = format!(
            "SELECT AVG(readiness_score) AS avg_score FROM readiness_reports \
             WHERE report_date >= ? AND report_date <= ? AND athlete_id IN ({})",
            TEAM_ATHLETE_IDS
        );
        let row = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .bind(team_id)
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("avg_score"))
    }

    /// Per-day average team readiness over a date range.
    pub async fn daily_team_averages(
        &self,
        team_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HashMap<NaiveDate, f64>, AppError> {
        let sql = format!(
            "SELECT report_date, AVG(readiness_score) AS avg_score FROM readiness_reports \
             WHERE report_date >= ? AND report_date <= ? AND athlete_id IN ({}) \
             GROUP BY report_date",
            TEAM_ATHLETE_IDS
        );
        let rows = sqlx::query(&sql)
            .bind(from)
            .bind(to)
            .bind(team_id)
            .bind(team_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get("report_date"), row.get("avg_score")))
            .collect())
    }

    /// Team averages for each raw metric on one date, in weight order.
    /// `None` when nobody reported.
    pub async fn metric_averages_for_date(
        &self,
        team_id: &str,
        date: NaiveDate,
    ) -> Result<Option<[f64; 7]>, AppError> {
        let sql = format!(
            "SELECT AVG(sleep_quality) AS sleep_quality, AVG(energy_fatigue) AS energy_fatigue, \
                    AVG(muscle_soreness) AS muscle_soreness, AVG(mood_stress) AS mood_stress, \
                    AVG(motivation) AS motivation, AVG(nutrition_quality) AS nutrition_quality, \
                    AVG(hydration) AS hydration \
             FROM readiness_reports WHERE report_date = ? AND athlete_id IN ({})",
            TEAM_ATHLETE_IDS
        );
        let row = sqlx::query(&sql)
            .bind(date)
            .bind(team_id)
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?;

        let sleep: Option<f64> = row.get("sleep_quality");
        let Some(sleep) = sleep else {
            return Ok(None);
        };
        Ok(Some([
            sleep,
            row.get("energy_fatigue"),
            row.get("muscle_soreness"),
            row.get("mood_stress"),
            row.get("motivation"),
            row.get("nutrition_quality"),
            row.get("hydration"),
        ]))
    }

    /// Dates with a report in the window, for streak computation.
    pub async fn report_dates_in_window(
        &self,
        athlete_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HashSet<NaiveDate>, AppError> {
        let rows = sqlx::query(
            "SELECT report_date FROM readiness_reports \
             WHERE athlete_id = ? AND report_date >= ? AND report_date <= ?",
        )
        .bind(athlete_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.get("report_date")).collect())
    }

    /// Readiness scores in the window, for baseline and consistency.
    pub async fn scores_in_window(
        &self,
        athlete_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<f64>, AppError> {
        let rows = sqlx::query(
            "SELECT readiness_score FROM readiness_reports \
             WHERE athlete_id = ? AND report_date >= ? AND report_date <= ?",
        )
        .bind(athlete_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| row.get::<i64, _>("readiness_score") as f64)
            .collect())
    }

    // ==================== LABEL OPERATIONS ====================

    /// Add a personal label to a day. One label per athlete per day.
    pub async fn create_label(
        &self,
        athlete_id: &str,
        request: &CreateLabelRequest,
    ) -> Result<PersonalLabel, AppError> {
        if self.get_user(athlete_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", athlete_id)));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let inserted = sqlx::query(
            "INSERT INTO personal_labels (id, athlete_id, label_date, label, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(athlete_id)
        .bind(request.label_date)
        .bind(&request.label)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await;

        if let Err(err) = inserted {
            if is_unique_violation(&err) {
                return Err(AppError::Conflict(format!(
                    "A label for {} already exists",
                    request.label_date
                )));
            }
            return Err(err.into());
        }

        Ok(PersonalLabel {
            id,
            athlete_id: athlete_id.to_string(),
            label_date: request.label_date,
            label: request.label.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Rewrite the label text for a day.
    pub async fn update_label(
        &self,
        athlete_id: &str,
        date: NaiveDate,
        request: &UpdateLabelRequest,
    ) -> Result<PersonalLabel, AppError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE personal_labels SET label = ?, updated_at = ? \
             WHERE athlete_id = ? AND label_date = ?",
        )
        .bind(&request.label)
        .bind(&now)
        .bind(athlete_id)
        .bind(date)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No label for {}", date)));
        }

        let row = sqlx::query(
            "SELECT id, athlete_id, label_date, label, created_at, updated_at \
             FROM personal_labels WHERE athlete_id = ? AND label_date = ?",
        )
        .bind(athlete_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        Ok(label_from_row(&row))
    }

    /// Remove the label for a day.
    pub async fn delete_label(&self, athlete_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM personal_labels WHERE athlete_id = ? AND label_date = ?")
                .bind(athlete_id)
                .bind(date)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("No label for {}", date)));
        }
        Ok(())
    }

    /// An athlete's labels within a date range, oldest first.
    pub async fn list_labels(
        &self,
        athlete_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PersonalLabel>, AppError> {
        let rows = sqlx::query(
            "SELECT id, athlete_id, label_date, label, created_at, updated_at \
             FROM personal_labels WHERE athlete_id = ? AND label_date >= ? AND label_date <= ? \
             ORDER BY label_date",
        )
        .bind(athlete_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(label_from_row).collect())
    }

    // ==================== FEATURE REQUEST OPERATIONS ====================

    /// List feature requests, optionally filtered, newest first.
    pub async fn list_feature_requests(
        &self,
        request_type: Option<RequestType>,
        status: Option<RequestStatus>,
    ) -> Result<Vec<FeatureRequest>, AppError> {
        let mut sql = String::from(
            "SELECT f.id, f.user_id, f.title, f.description, f.request_type, f.status, \
                    f.created_at, f.updated_at, COUNT(v.user_id) AS upvote_count \
             FROM feature_requests f \
             LEFT JOIN feature_request_upvotes v ON v.request_id = f.id",
        );
        let mut clauses = Vec::new();
        if request_type.is_some() {
            clauses.push("f.request_type = ?");
        }
        if status.is_some() {
            clauses.push("f.status = ?");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" GROUP BY f.id ORDER BY f.created_at DESC");

        let mut query = sqlx::query(&sql);
        if let Some(t) = request_type {
            query = query.bind(t.as_str());
        }
        if let Some(s) = status {
            query = query.bind(s.as_str());
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(feature_from_row).collect())
    }

    /// Submit a feature request or bug report.
    pub async fn create_feature_request(
        &self,
        request: &CreateFeatureRequest,
    ) -> Result<FeatureRequest, AppError> {
        if self.get_user(&request.user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                request.user_id
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO feature_requests (id, user_id, title, description, request_type, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 'OPEN', ?, ?)",
        )
        .bind(&id)
        .bind(&request.user_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.request_type.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(FeatureRequest {
            id,
            user_id: request.user_id.clone(),
            title: request.title.clone(),
            description: request.description.clone(),
            request_type: request.request_type,
            status: RequestStatus::Open,
            upvote_count: 0,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a feature request by ID.
    pub async fn get_feature_request(
        &self,
        id: &str,
    ) -> Result<Option<FeatureRequest>, AppError> {
        let row = sqlx::query(
            "SELECT f.id, f.user_id, f.title, f.description, f.request_type, f.status, \
                    f.created_at, f.updated_at, COUNT(v.user_id) AS upvote_count \
             FROM feature_requests f \
             LEFT JOIN feature_request_upvotes v ON v.request_id = f.id \
             WHERE f.id = ? GROUP BY f.id",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(feature_from_row))
    }

    /// Move a request through its lifecycle.
    pub async fn update_feature_status(
        &self,
        id: &str,
        status: RequestStatus,
    ) -> Result<FeatureRequest, AppError> {
        let now = Utc::now().to_rfc3339();
        let result =
            sqlx::query("UPDATE feature_requests SET status = ?, updated_at = ? WHERE id = ?")
                .bind(status.as_str())
                .bind(&now)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Feature request {} not found",
                id
            )));
        }

        self.get_feature_request(id).await?.ok_or_else(|| {
            AppError::Internal("Feature request vanished after update".to_string())
        })
    }

    /// Toggle a user's upvote on a request.
    pub async fn toggle_upvote(
        &self,
        request_id: &str,
        user_id: &str,
    ) -> Result<UpvoteResult, AppError> {
        if self.get_feature_request(request_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Feature request {} not found",
                request_id
            )));
        }
        if self.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        let removed = sqlx::query(
            "DELETE FROM feature_request_upvotes WHERE request_id = ? AND user_id = ?",
        )
        .bind(request_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let upvoted = if removed.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO feature_request_upvotes (request_id, user_id) VALUES (?, ?)",
            )
            .bind(request_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
            true
        } else {
            false
        };

        let row = sqlx::query(
            "SELECT COUNT(*) AS upvote_count FROM feature_request_upvotes WHERE request_id = ?",
        )
        .bind(request_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UpvoteResult {
            upvoted,
            upvote_count: row.get("upvote_count"),
        })
    }

    /// Comments on a request, oldest first.
    pub async fn list_comments(&self, request_id: &str) -> Result<Vec<FeatureComment>, AppError> {
        let rows = sqlx::query(
            "SELECT id, request_id, user_id, comment, created_at \
             FROM feature_request_comments WHERE request_id = ? ORDER BY created_at",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(comment_from_row).collect())
    }

    /// Comment on a request.
    pub async fn create_comment(
        &self,
        request_id: &str,
        request: &CreateCommentRequest,
    ) -> Result<FeatureComment, AppError> {
        if self.get_feature_request(request_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Feature request {} not found",
                request_id
            )));
        }
        if self.get_user(&request.user_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                request.user_id
            )));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO feature_request_comments (id, request_id, user_id, comment, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(request_id)
        .bind(&request.user_id)
        .bind(&request.comment)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(FeatureComment {
            id,
            request_id: request_id.to_string(),
            user_id: request.user_id.clone(),
            comment: request.comment.clone(),
            created_at: now,
        })
    }
}

fn validate_target_range(target_min: u8, target_max: u8) -> Result<(), AppError> {
    if target_min > 100 || target_max > 100 {
        return Err(AppError::Validation(
            "Target range values must be between 0 and 100".to_string(),
        ));
    }
    if target_min > target_max {
        return Err(AppError::Validation(
            "Minimum target cannot be greater than maximum target".to_string(),
        ));
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow, team_ids: Vec<String>) -> User {
    let role: String = row.get("role");
    let status: String = row.get("current_status");
    let reminder: i32 = row.get("daily_reminder_enabled");
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        role: Role::parse(&role).unwrap_or(Role::Athlete),
        team_id: row.get("team_id"),
        team_ids,
        current_status: PlayerStatus::parse(&status).unwrap_or(PlayerStatus::Available),
        status_note: row.get("status_note"),
        status_updated_at: row.get("status_updated_at"),
        timezone: row.get("timezone"),
        daily_reminder_enabled: reminder != 0,
        created_at: row.get("created_at"),
    }
}

fn team_from_row(row: &sqlx::sqlite::SqliteRow) -> Team {
    let target: i64 = row.get("target_readiness");
    let display_mode: String = row.get("logo_display_mode");
    let position: String = row.get("background_position");
    Team {
        id: row.get("id"),
        name: row.get("name"),
        join_code: row.get("join_code"),
        target_readiness: target as u8,
        logo_path: row.get("logo_path"),
        logo_display_mode: crate::models::LogoDisplayMode::parse(&display_mode)
            .unwrap_or(crate::models::LogoDisplayMode::None),
        background_opacity: row.get("background_opacity"),
        background_position: crate::models::BackgroundPosition::parse(&position)
            .unwrap_or(crate::models::BackgroundPosition::Center),
        created_at: row.get("created_at"),
    }
}

fn tag_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamTag {
    let target_min: i64 = row.get("target_min");
    let target_max: i64 = row.get("target_max");
    TeamTag {
        id: row.get("id"),
        team_id: row.get("team_id"),
        name: row.get("name"),
        target_min: target_min as u8,
        target_max: target_max as u8,
        color: row.get("color"),
    }
}

fn schedule_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<TeamSchedule, AppError> {
    let weekly: String = row.get("weekly_pattern");
    let overrides: String = row.get("date_overrides");
    Ok(TeamSchedule {
        team_id: row.get("team_id"),
        weekly_pattern: serde_json::from_str(&weekly)?,
        date_overrides: serde_json::from_str(&overrides)?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn report_from_row(row: &sqlx::sqlite::SqliteRow) -> ReadinessReport {
    let get_u8 = |name: &str| row.get::<i64, _>(name) as u8;
    ReadinessReport {
        id: row.get("id"),
        athlete_id: row.get("athlete_id"),
        report_date: row.get("report_date"),
        metrics: MetricSet {
            sleep_quality: get_u8("sleep_quality"),
            energy_fatigue: get_u8("energy_fatigue"),
            muscle_soreness: get_u8("muscle_soreness"),
            mood_stress: get_u8("mood_stress"),
            motivation: get_u8("motivation"),
            nutrition_quality: get_u8("nutrition_quality"),
            hydration: get_u8("hydration"),
        },
        readiness_score: get_u8("readiness_score"),
        comments: row.get("comments"),
        created_at: row.get("created_at"),
    }
}

fn label_from_row(row: &sqlx::sqlite::SqliteRow) -> PersonalLabel {
    PersonalLabel {
        id: row.get("id"),
        athlete_id: row.get("athlete_id"),
        label_date: row.get("label_date"),
        label: row.get("label"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn feature_from_row(row: &sqlx::sqlite::SqliteRow) -> FeatureRequest {
    let request_type: String = row.get("request_type");
    let status: String = row.get("status");
    FeatureRequest {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        description: row.get("description"),
        request_type: RequestType::parse(&request_type).unwrap_or(RequestType::Feature),
        status: RequestStatus::parse(&status).unwrap_or(RequestStatus::Open),
        upvote_count: row.get("upvote_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> FeatureComment {
    FeatureComment {
        id: row.get("id"),
        request_id: row.get("request_id"),
        user_id: row.get("user_id"),
        comment: row.get("comment"),
        created_at: row.get("created_at"),
    }
}
