use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::PgExecutor;

use crate::models::settings::{PotSettings, UpdatePotSettingsRequest, PERFECT_WEEK_MULTIPLIER, WEEKLY_BUY_IN};

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Setting {name} has a non-numeric value {value:?}")]
    InvalidValue { name: String, value: String },
}

#[derive(Debug, sqlx::FromRow)]
struct SettingRow {
    setting_name: String,
    value: Option<String>,
}

/// Read the pot policy. Missing rows fall back to the defaults.
pub async fn fetch_pot_settings<'e, E>(executor: E) -> Result<PotSettings, SettingsError>
where
    E: PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, SettingRow>(
        "SELECT setting_name, value FROM settings WHERE setting_name = ANY($1)",
    )
    .bind(vec![WEEKLY_BUY_IN, PERFECT_WEEK_MULTIPLIER])
    .fetch_all(executor)
    .await?;

    let mut settings = PotSettings::default();
    for row in rows {
        let Some(raw) = row.value else {
            continue;
        };
        let parsed = Decimal::from_str(raw.trim()).map_err(|_| SettingsError::InvalidValue {
            name: row.setting_name.clone(),
            value: raw.clone(),
        })?;
        match row.setting_name.as_str() {
            WEEKLY_BUY_IN => settings.weekly_buy_in = parsed,
            PERFECT_WEEK_MULTIPLIER => settings.perfect_week_multiplier = parsed,
            _ => {}
        }
    }

    Ok(settings)
}

pub async fn upsert_setting<'e, E>(executor: E, name: &str, value: Decimal) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO settings (setting_name, value)
        VALUES ($1, $2)
        ON CONFLICT (setting_name) DO UPDATE SET value = EXCLUDED.value
        "#,
    )
    .bind(name)
    .bind(value.normalize().to_string())
    .execute(executor)
    .await?;

    Ok(())
}

/// Named settings touched by an update request.
pub fn changed_settings(request: &UpdatePotSettingsRequest) -> Vec<(&'static str, Decimal)> {
    let mut changes = Vec::new();
    if let Some(buy_in) = request.weekly_buy_in {
        changes.push((WEEKLY_BUY_IN, buy_in));
    }
    if let Some(multiplier) = request.perfect_week_multiplier {
        changes.push((PERFECT_WEEK_MULTIPLIER, multiplier));
    }
    changes
}
