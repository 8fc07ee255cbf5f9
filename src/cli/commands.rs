use crate::core::{Coin, DecCoin};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "rewards-ante")]
pub struct Opt {
    #[arg(long = "config", global = true, help = "TOML settings file")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(name = "setminfee", about = "Set the minimum gas unit price")]
    SetMinFee {
        #[arg(help = "Price per gas unit, e.g. 0.0025uarch")]
        price: DecCoin,
    },
    #[command(name = "clearminfee", about = "Remove the minimum gas unit price")]
    ClearMinFee,
    #[command(name = "setflatfee", about = "Register a flat fee for a contract")]
    SetFlatFee {
        #[arg(help = "Bech32 contract address")]
        contract: String,
        #[arg(help = "Flat fee, e.g. 1000uarch")]
        fee: Coin,
    },
    #[command(name = "removeflatfee", about = "Remove a contract's flat fee")]
    RemoveFlatFee {
        #[arg(help = "Bech32 contract address")]
        contract: String,
    },
    #[command(name = "showfees", about = "Print the registered fee parameters")]
    ShowFees,
    #[command(name = "check", about = "Run the minimum fee check on a transaction")]
    Check {
        #[arg(help = "Path to the transaction JSON")]
        tx: PathBuf,
        #[arg(long = "simulate", help = "Treat the transaction as a dry-run")]
        simulate: bool,
    },
    #[command(
        name = "wrapmsg",
        about = "Encode a message JSON into an envelope for delegated execution"
    )]
    WrapMsg {
        #[arg(help = "Path to the message JSON")]
        msg: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set_min_fee() {
        let opt = Opt::try_parse_from(["rewards-ante", "setminfee", "0.0025uarch"]).unwrap();
        match opt.command {
            Command::SetMinFee { price } => assert_eq!(price.to_string(), "0.0025uarch"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_check_with_config() {
        let opt = Opt::try_parse_from([
            "rewards-ante",
            "check",
            "tx.json",
            "--simulate",
            "--config",
            "ante.toml",
        ])
        .unwrap();
        assert_eq!(opt.config, Some(PathBuf::from("ante.toml")));
        assert!(matches!(opt.command, Command::Check { simulate: true, .. }));
    }

    #[test]
    fn test_rejects_bad_coin() {
        assert!(Opt::try_parse_from(["rewards-ante", "setflatfee", "archway1abc", "lots"]).is_err());
    }
}
