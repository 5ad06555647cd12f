use crate::server::{check_config, config::AppConfig, load_config};
use relay_channels::util::yes_no;

pub fn run() -> anyhow::Result<()> {
    println!("🏥 Relay Doctor\n");

    let config = load_config()?;
    print!("{}", summary(&config));

    let warnings = check_config(&config);
    println!();
    if warnings.is_empty() {
        println!("✅ All checks passed! Ready to receive webhooks.");
    } else {
        for warning in &warnings {
            println!("⚠️  {warning}");
        }
        println!("\nSome checks failed. Please fix the issues above.");
        std::process::exit(1);
    }

    Ok(())
}

/// Redacted configuration summary
fn summary(config: &AppConfig) -> String {
    let phone = if config.whatsapp.phone_number_id.is_empty() {
        "NOT SET"
    } else {
        config.whatsapp.phone_number_id.as_str()
    };

    format!(
        "Listen address:     {}:{}\n\
         Graph API:          {}/{}\n\
         Phone Number ID:    {}\n\
         Token configured:   {}\n\
         Verify token set:   {}\n",
        config.server.host,
        config.server.port,
        config.whatsapp.api_base_url,
        config.whatsapp.api_version,
        phone,
        yes_no(config.whatsapp.has_access_token()),
        yes_no(config.whatsapp.has_verify_token()),
    )
}
