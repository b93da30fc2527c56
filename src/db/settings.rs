use crate::models::UserRole;
use rusqlite::{Connection, OptionalExtension, Result};

const ONBOARDING_COMPLETE_KEY: &str = "onboarding.complete";
const USER_ROLE_KEY: &str = "onboarding.role";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row("SELECT value FROM settings WHERE key = ?", [key], |row| {
        row.get(0)
    })
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        rusqlite::params![key, value, super::now()],
    )?;
    Ok(())
}

/// First-run state. Read once when the app starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Onboarding {
    pub completed: bool,
    pub role: Option<UserRole>,
}

pub fn load_onboarding(conn: &Connection) -> Result<Onboarding> {
    let completed = get_setting(conn, ONBOARDING_COMPLETE_KEY)?.as_deref() == Some("true");
    let role = get_setting(conn, USER_ROLE_KEY)?
        .as_deref()
        .and_then(UserRole::parse);
    Ok(Onboarding { completed, role })
}

pub fn complete_onboarding(conn: &Connection, role: UserRole) -> Result<()> {
    set_setting(conn, USER_ROLE_KEY, role.as_str())?;
    set_setting(conn, ONBOARDING_COMPLETE_KEY, "true")
}
