use std::num::ParseIntError;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
pub struct Cli {
    /// Flash image file
    #[arg(long, short)]
    pub image: PathBuf,

    /// First address of the user application, the filesystem starts at the next sector
    #[arg(long, short, default_value = "0xC000", value_parser = parse_addr)]
    pub user_start: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an erased image
    Create {
        /// Image size in bytes
        #[arg(long, short, default_value_t = 1024 * 1024)]
        size: u64,
    },
    /// Print the block device geometry
    Info,
    /// Erase one block
    Erase { block: usize },
    /// Read one block, as hex unless `--out` is given
    Dump {
        block: usize,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Erase one block and program it from a file
    Load {
        block: usize,
        #[arg(long, short = 'f')]
        input: PathBuf,
    },
}

/// 十进制或`0x`开头的十六进制地址
fn parse_addr(s: &str) -> Result<usize, ParseIntError> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(Ok(49152), parse_addr("49152"));
        assert_eq!(Ok(0xC000), parse_addr("0xC000"));
        assert_eq!(Ok(0xC000), parse_addr("0Xc000"));
        assert!(parse_addr("0xZZ").is_err());
        assert!(parse_addr("").is_err());
    }

    #[test]
    fn default_user_start() {
        let cli = Cli::try_parse_from(["flash-tool", "-i", "flash.img", "info"]).unwrap();
        assert_eq!(0xC000, cli.user_start);
        assert!(matches!(cli.command, Command::Info));
    }
}
