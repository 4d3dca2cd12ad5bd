//! `quadrax doctor`: Diagnose configuration.

use quadrax_config::AppConfig;
use quadrax_telemetry::LogLevel;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("QUADRAX•ML Doctor");
    println!("=================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ℹ️  No config file, using defaults and environment");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key, set QUADRAX_API_KEY or api_key in config.toml");
        issues += 1;
    }

    match config.logging.level.parse::<LogLevel>() {
        Ok(level) => println!("  ✅ Log level {level}"),
        Err(e) => {
            println!("  ⚠️  {e}; INFO will be used");
            issues += 1;
        }
    }

    if config.logging.production {
        println!("  ✅ Daily log files in {}", config.logging.dir.display());
    }

    if config.identity.url.is_none() && config.identity.tokens.is_empty() {
        println!("  ⚠️  No identity service or static tokens, every request will be rejected");
        issues += 1;
    } else {
        println!("  ✅ Authentication configured");
    }

    let provider = quadrax_providers::build_from_config(&config);
    match provider.health_check().await {
        Ok(true) => println!("  ✅ Completion backend reachable ({})", provider.name()),
        Ok(false) => {
            println!("  ⚠️  Completion backend answered but is unhealthy ({})", provider.name());
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Completion backend unreachable: {e}");
            issues += 1;
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
