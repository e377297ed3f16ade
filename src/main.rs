use binluhn::config::{GenerateArgs, LookupArgs, ValidateArgs};
use binluhn::core::luhn;
use binluhn::utils::error::ErrorSeverity;
use binluhn::utils::{logger, validation::Validate};
use binluhn::{
    generate_batch, BatchWriter, BinLookup, BinlistClient, BinluhnError, CliConfig, Command,
    GenerateRequest, LocalStorage, Settings,
};
use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting binluhn CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<i32, BinluhnError> {
    let settings = Settings::load(config.config.as_deref())?;

    match config.command {
        Command::Lookup(args) => run_lookup(settings, args).await,
        Command::Generate(args) => run_generate(settings, args).await,
        Command::Validate(args) => run_validate(&args),
    }
}

async fn run_lookup(mut settings: Settings, args: LookupArgs) -> Result<i32, BinluhnError> {
    if let Some(endpoint) = args.endpoint {
        settings.lookup_endpoint = endpoint;
    }
    if let Some(timeout) = args.timeout_seconds {
        settings.timeout_seconds = timeout;
    }
    settings.validate()?;

    let client = BinlistClient::from_config(&settings)?;
    let info = client.lookup(&args.bin).await?;

    tracing::info!("🔍 BIN {} resolved to scheme {}", info.bin, info.display_scheme());
    println!("{}", info);
    Ok(0)
}

async fn run_generate(mut settings: Settings, args: GenerateArgs) -> Result<i32, BinluhnError> {
    let save = args.save || args.output_path.is_some() || !args.format.is_empty();

    if let Some(count) = args.count {
        settings.count = count;
    }
    if let Some(strategy) = args.strategy {
        settings.strategy = strategy;
    }
    if let Some(path) = args.output_path {
        settings.output_path = path;
    }
    if !args.format.is_empty() {
        settings.output_formats = args.format;
    }
    settings.validate()?;

    let (prefix, length) =
        settings.resolve_target(args.brand.as_deref(), args.prefix.as_deref(), args.length)?;
    let request = GenerateRequest::with_prefix(prefix, length, settings.count)
        .strategy(settings.strategy);

    let batch = {
        let mut rng: Box<dyn RngCore> = match args.seed {
            Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
            None => Box::new(rand::rng()),
        };
        generate_batch(&request, rng.as_mut())?
    };

    tracing::info!("✅ Generated {} numbers", batch.numbers.len());
    for number in &batch.numbers {
        println!("{}", number);
    }

    if save {
        let writer = BatchWriter::new(LocalStorage::new(settings.output_path.clone()));
        let written = writer.save(&batch, &settings.output_formats).await?;
        for filename in written {
            tracing::info!("📁 Output saved to: {}/{}", settings.output_path, filename);
            println!("📁 Output saved to: {}/{}", settings.output_path, filename);
        }
    }

    Ok(0)
}

fn run_validate(args: &ValidateArgs) -> Result<i32, BinluhnError> {
    let mut invalid = 0;

    for number in &args.numbers {
        if luhn::validate(number)? {
            println!("{}: valid", number);
        } else {
            invalid += 1;
            println!("{}: invalid", number);
        }
    }

    tracing::debug!("{} of {} numbers failed the checksum", invalid, args.numbers.len());
    Ok(if invalid > 0 { 1 } else { 0 })
}
