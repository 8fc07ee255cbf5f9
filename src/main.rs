// This is my entry point for the fee registry and minimum fee check CLI
// I pull in the registry, the checker and the settings I built in the library
use clap::Parser;
use log::{error, LevelFilter};
use rewards_ante::address::AccAddress;
use rewards_ante::{
    BincodeMessageCodec, CheckerOptions, Command, FeeRegistry, Message, MinFeeChecker, Opt,
    Settings, SledFeeRegistry, Transaction, GLOBAL_CONFIG,
};
use std::process;

// I exit with this code when a transaction is rejected, so scripts can tell
// a rejection apart from a broken registry or a bad config file
const REJECTED_EXIT_CODE: i32 = 2;

fn main() {
    // I initialize logging at Info so I see registry updates and rejections
    env_logger::builder().filter_level(LevelFilter::Info).init();

    // I parse the command line arguments using clap
    let opt = Opt::parse();

    // I load settings first, then run the command; any error ends with code 1
    if let Err(e) = load_settings(&opt).and_then(|settings| run_command(opt.command, settings)) {
        error!("Error: {e}");
        process::exit(1);
    }
}

// Defaults and environment come from GLOBAL_CONFIG; a --config file replaces them
fn load_settings(opt: &Opt) -> Result<Settings, Box<dyn std::error::Error>> {
    if let Some(path) = &opt.config {
        // The environment still wins over the file, same as over the defaults
        let settings = Settings::load_file(path)?.apply_env()?;
        GLOBAL_CONFIG.replace(settings);
    }
    Ok(GLOBAL_CONFIG.settings())
}

// This is where I handle the different CLI commands
// Most of them open the Sled registry, change one entry and flush it
fn run_command(command: Command, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let prefix = settings.bech32_prefix.clone();

    match command {
        // When I want to turn on the minimum fee, I store the gas unit price
        Command::SetMinFee { price } => {
            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            registry.set_min_consensus_fee(&price)?;
            // I flush right away so the next check sees the new price
            registry.flush()?;
            println!("Minimum gas unit price set to {price}");
        }
        // When I want to turn the minimum fee off entirely
        Command::ClearMinFee => {
            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            registry.clear_min_consensus_fee()?;
            registry.flush()?;
            println!("Minimum gas unit price cleared");
        }
        // When I want a contract to charge a flat fee on every call
        Command::SetFlatFee { contract, fee } => {
            // I parse the address first so a typo never lands in the registry
            let address = AccAddress::from_bech32_with_prefix(&contract, &prefix)?;
            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            registry.set_flat_fee(&address, &fee)?;
            registry.flush()?;
            println!("Flat fee for {contract} set to {fee}");
        }
        // When I want to drop a contract's flat fee
        Command::RemoveFlatFee { contract } => {
            let address = AccAddress::from_bech32_with_prefix(&contract, &prefix)?;
            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            if registry.remove_flat_fee(&address)? {
                registry.flush()?;
                println!("Flat fee for {contract} removed");
            } else {
                println!("No flat fee registered for {contract}");
            }
        }
        // When I want to see everything the registry currently holds
        Command::ShowFees => {
            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            match registry.min_consensus_fee()? {
                Some(price) => println!("Minimum gas unit price: {price}"),
                None => println!("Minimum gas unit price: not set"),
            }
            let flat_fees = registry.flat_fees()?;
            println!("Flat fees ({}):", flat_fees.len());
            for (address, fee) in flat_fees {
                // I print addresses back in bech32 so they match what I typed in
                println!("  {}: {fee}", address.to_bech32(&prefix)?);
            }
        }
        // When I want to know whether a transaction would get into a block
        Command::Check { tx, simulate } => {
            let raw = std::fs::read_to_string(&tx)?;

            let registry = SledFeeRegistry::open(&settings.registry_path)?;
            let checker = MinFeeChecker::with_options(
                registry,
                BincodeMessageCodec::new(settings.max_message_bytes),
                CheckerOptions::from(&settings),
            );

            // I read the transaction as JSON, the same shape `to_json` writes;
            // one that does not decode is rejected like any other bad tx
            let outcome = Transaction::from_json(&raw)
                .and_then(|transaction| checker.check(&transaction, simulate));

            match outcome {
                Ok(reason) => println!("Accepted: {reason:?}"),
                // A rejection is an answer, not a failure, so I report its code
                Err(e) if e.is_rejection() => {
                    println!("Rejected (code {}): {e}", e.code());
                    process::exit(REJECTED_EXIT_CODE);
                }
                Err(e) => return Err(e.into()),
            }
        }
        // When I need an envelope for a MsgExec, I wrap a message as JSON
        Command::WrapMsg { msg } => {
            let raw = std::fs::read_to_string(&msg)?;
            let message: Message = serde_json::from_str(&raw)?;
            println!("{}", serde_json::to_string_pretty(&message.to_any()?)?);
        }
    }
    Ok(())
}
