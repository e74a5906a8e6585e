//! Unit conversion commands

use std::cmp::Ordering;

use aptflow_units::{
    compare_amounts, convert_between_decimals, format_units, is_valid_amount, parse_whole_str,
    to_whole_units, Amount, APT_DECIMALS,
};
use clap::Subcommand;

use crate::{output::Output, CliError};

/// Units subcommands
#[derive(Debug, Subcommand)]
pub enum UnitsCommand {
    /// Whole tokens to smallest units (1.5 APT -> 150000000 octas)
    ToSmallest {
        /// Whole-token amount; thousands separators are ignored
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Coin decimals
        #[arg(long, default_value_t = APT_DECIMALS)]
        decimals: u32,
    },
    /// Smallest units to whole tokens as a float, for display only
    ToWhole {
        /// Smallest-unit amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Coin decimals
        #[arg(long, default_value_t = APT_DECIMALS)]
        decimals: u32,
    },
    /// Smallest units to an exact fixed-point string
    Format {
        /// Smallest-unit amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Coin decimals
        #[arg(long, default_value_t = APT_DECIMALS)]
        decimals: u32,
        /// Fractional digits to show (rounded half up)
        #[arg(long)]
        precision: Option<u32>,
    },
    /// Rescale smallest units between coins with different decimals
    Convert {
        /// Smallest-unit amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Source decimals
        #[arg(long)]
        from: u32,
        /// Target decimals
        #[arg(long)]
        to: u32,
    },
    /// Compare two amounts
    Compare {
        /// First amount
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Second amount
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
    /// Check that an amount is a finite, non-negative number
    Validate {
        /// Amount
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

impl UnitsCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            UnitsCommand::ToSmallest { amount, decimals } => {
                let smallest = parse_whole_str(&amount, decimals)?.to_string();
                Output::new(json)
                    .field("amount", &amount)
                    .field("smallest", &smallest)
                    .field_u64("decimals", decimals as u64)
                    .message(&smallest)
                    .print();
            }
            UnitsCommand::ToWhole { amount, decimals } => {
                let whole = to_whole_units(Amount::from(amount.as_str()), decimals)?;
                Output::new(json)
                    .field("amount", &amount)
                    .field_value("whole", serde_json::json!(whole))
                    .field_u64("decimals", decimals as u64)
                    .message(&whole.to_string())
                    .print();
            }
            UnitsCommand::Format {
                amount,
                decimals,
                precision,
            } => {
                let formatted = format_units(Amount::from(amount.as_str()), decimals, precision)?;
                Output::new(json)
                    .field("amount", &amount)
                    .field("formatted", &formatted)
                    .message(&formatted)
                    .print();
            }
            UnitsCommand::Convert { amount, from, to } => {
                let value = Amount::from(amount.as_str()).to_integer()?;
                let converted = convert_between_decimals(&value, from, to)?.to_string();
                Output::new(json)
                    .field("amount", &amount)
                    .field("converted", &converted)
                    .message(&converted)
                    .print();
            }
            UnitsCommand::Compare { a, b } => {
                let ordering = compare_amounts(a.as_str(), b.as_str())?;
                let (sign, word) = match ordering {
                    Ordering::Less => (-1, "less"),
                    Ordering::Equal => (0, "equal"),
                    Ordering::Greater => (1, "greater"),
                };
                Output::new(json)
                    .field_value("result", serde_json::json!(sign))
                    .field("ordering", word)
                    .message(&sign.to_string())
                    .print();
            }
            UnitsCommand::Validate { amount } => {
                let valid = is_valid_amount(amount.as_str());
                Output::new(json)
                    .field("amount", &amount)
                    .field_bool("valid", valid)
                    .message(if valid { "valid" } else { "invalid" })
                    .print();
            }
        }
        Ok(())
    }
}
