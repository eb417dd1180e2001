//! Settings CLI commands

use clap::Subcommand;

use super::expense::parse_amount;
use crate::config::settings::{EnforcementPolicy, Settings, SettingsPatch};
use crate::error::{SpendGuardError, SpendGuardResult};
use crate::models::Category;
use crate::session::Session;
use crate::storage::Persistence;

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show the current settings
    Show,
    /// Change one or more settings
    Set {
        /// Nominal daily budget
        #[arg(long)]
        daily_limit: Option<String>,
        /// Monthly ceiling
        #[arg(long)]
        monthly_limit: Option<String>,
        /// Currency label shown next to amounts
        #[arg(long)]
        currency: Option<String>,
        /// Your name
        #[arg(long)]
        name: Option<String>,
        /// Enforcement policy (soft or hard)
        #[arg(long)]
        policy: Option<EnforcementPolicy>,
        /// Near-limit warning threshold, in percent of the limit
        #[arg(long)]
        near_limit_percent: Option<u8>,
        /// Allowed categories, comma separated
        #[arg(long, value_delimiter = ',')]
        categories: Option<Vec<String>>,
    },
}

/// Handle a settings command
pub fn handle_settings_command<P: Persistence>(
    session: &mut Session<P>,
    cmd: SettingsCommands,
) -> SpendGuardResult<()> {
    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(session.settings()));
        }
        SettingsCommands::Set {
            daily_limit,
            monthly_limit,
            currency,
            name,
            policy,
            near_limit_percent,
            categories,
        } => {
            let patch = SettingsPatch {
                daily_limit: daily_limit.as_deref().map(parse_amount).transpose()?,
                monthly_limit: monthly_limit.as_deref().map(parse_amount).transpose()?,
                currency,
                name,
                enforcement: policy,
                near_limit_percent,
                categories: categories
                    .map(|names| names.into_iter().map(Category::new).collect()),
            };

            if patch.is_empty() {
                return Err(SpendGuardError::Validation(
                    "Nothing to change. Run 'spendguard settings set --help' for options".into(),
                ));
            }

            let updated = session.update_settings(&patch)?;
            println!("Settings updated.");
            print!("{}", format_settings(updated));
        }
    }

    Ok(())
}

fn format_settings(settings: &Settings) -> String {
    let label = &settings.currency;
    let categories: Vec<&str> = settings.categories.iter().map(|c| c.name()).collect();

    let mut output = String::new();
    if !settings.name.is_empty() {
        output.push_str(&format!("Name:              {}\n", settings.name));
    }
    output.push_str(&format!(
        "Daily limit:       {}\n",
        settings.daily_limit.format_with_label(label)
    ));
    output.push_str(&format!(
        "Monthly limit:     {}\n",
        settings.monthly_limit.format_with_label(label)
    ));
    output.push_str(&format!("Currency:          {}\n", settings.currency));
    output.push_str(&format!("Policy:            {}\n", settings.enforcement));
    output.push_str(&format!(
        "Near-limit warn:   {}%\n",
        settings.near_limit_percent
    ));
    output.push_str(&format!("Categories:        {}\n", categories.join(", ")));
    output
}
