use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
    Other => "other",
});

str_enum!(RiskLevel {
    Low => "low",
    Moderate => "moderate",
    High => "high",
});

str_enum!(PatientStatus {
    Active => "active",
    Critical => "critical",
});

impl Gender {
    /// NHANES RIAGENDR code written for this gender on create.
    pub fn code(self) -> i64 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::Other => 3,
        }
    }
}

/// NHANES yes/no answer code: 1 = yes, 2 = no.
pub const ANSWER_YES: i64 = 1;
pub const ANSWER_NO: i64 = 2;

/// Encode a boolean history flag as a questionnaire answer code.
pub fn answer_code(yes: bool) -> i64 {
    if yes {
        ANSWER_YES
    } else {
        ANSWER_NO
    }
}
