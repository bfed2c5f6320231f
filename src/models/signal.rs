use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete trading decision emitted by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    #[default]
    None,
    Buy,
    Sell,
    Call,
    Put,
}

impl Signal {
    pub fn is_none(&self) -> bool {
        matches!(self, Signal::None)
    }

    /// CALL/PUT come from the options path.
    pub fn is_derivative(&self) -> bool {
        matches!(self, Signal::Call | Signal::Put)
    }

    /// Order side for a fired signal. Calls and puts are both bought contracts,
    /// so they map to the buy side of the option order path.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Signal::None => None,
            Signal::Buy | Signal::Call | Signal::Put => Some(Direction::Buy),
            Signal::Sell => Some(Direction::Sell),
        }
    }

    /// Contract type for option signals. `None` for the directional variants.
    pub fn option_type(&self) -> Option<OptionType> {
        match self {
            Signal::Call => Some(OptionType::Call),
            Signal::Put => Some(OptionType::Put),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::None => "NONE",
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Call => "CALL",
            Signal::Put => "PUT",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Buy,
    Sell,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Buy => "buy",
            Direction::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Option contract bought on the option order path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
