//! Private key format selector.
//!
//! The numeric values are shared with host applications and must not change:
//!   0 = Any, 1 = PEM, 2 = DER, 3 = X963

use core::fmt;
use core::str::FromStr;

use crate::error::UnwrapError;

/// Which encoding(s) to try when parsing the recipient private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum PrivateKeyFormat {
    /// Try PEM, then DER, then X9.63; first success wins.
    Any = 0,
    Pem = 1,
    Der = 2,
    X963 = 3,
}

/// Precedence used for [`PrivateKeyFormat::Any`].
static ANY_ORDER: [PrivateKeyFormat; 3] =
    [PrivateKeyFormat::Pem, PrivateKeyFormat::Der, PrivateKeyFormat::X963];

impl PrivateKeyFormat {
    /// Resolve a host-supplied tag.
    pub fn from_raw(tag: i64) -> Result<Self, UnwrapError> {
        match tag {
            0 => Ok(Self::Any),
            1 => Ok(Self::Pem),
            2 => Ok(Self::Der),
            3 => Ok(Self::X963),
            other => Err(UnwrapError::InvalidPrivateKeyFormat(other)),
        }
    }

    pub fn as_raw(self) -> i64 {
        self as i64
    }

    /// Concrete encodings to attempt, in order.
    pub fn candidates(&self) -> &'static [PrivateKeyFormat] {
        match self {
            Self::Any => &ANY_ORDER,
            Self::Pem => &ANY_ORDER[0..1],
            Self::Der => &ANY_ORDER[1..2],
            Self::X963 => &ANY_ORDER[2..3],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Pem => "pem",
            Self::Der => "der",
            Self::X963 => "x963",
        }
    }
}

impl TryFrom<i64> for PrivateKeyFormat {
    type Error = UnwrapError;

    fn try_from(tag: i64) -> Result<Self, Self::Error> {
        Self::from_raw(tag)
    }
}

impl fmt::Display for PrivateKeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrivateKeyFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" | "all" => Ok(Self::Any),
            "pem" => Ok(Self::Pem),
            "der" => Ok(Self::Der),
            "x963" | "x9.63" => Ok(Self::X963),
            other => Err(format!("unknown key format '{}' (expected any, pem, der, x963)", other)),
        }
    }
}
