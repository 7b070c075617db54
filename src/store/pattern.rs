// Copyright (c) 2025 Complaint Detector Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Pattern records and their closed vocabularies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DetectorError, DetectorResult};
use crate::matching::MAX_PATTERN_LENGTH;
use crate::normalize::{NormalizationOptions, Normalizer};

/// Maximum alert message length in characters.
pub const MAX_ALERT_MESSAGE_LENGTH: usize = 500;

/// Alert level attached to a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AlertLevel {
    /// Minor complaint marker
    Low,
    /// Complaint marker
    Medium,
    /// Critical complaint marker
    High,
}

impl AlertLevel {
    /// Wire name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertLevel {
    type Err = DetectorError;

    fn from_str(s: &str) -> DetectorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "bajo" => Ok(Self::Low),
            "medium" | "medio" => Ok(Self::Medium),
            "high" | "alto" => Ok(Self::High),
            _ => Err(DetectorError::Validation(format!(
                "invalid alert_level '{s}': expected 'low', 'medium' or 'high'"
            ))),
        }
    }
}

impl TryFrom<String> for AlertLevel {
    type Error = DetectorError;

    fn try_from(value: String) -> DetectorResult<Self> {
        value.parse()
    }
}

/// Four-tier collapse of the category taxonomy shown to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintTier {
    /// "Queja leve"
    QuejaLeve,
    /// "Reclamo"
    Reclamo,
    /// "Reclamo crítico"
    ReclamoCritico,
    /// "Riesgo legal"
    RiesgoLegal,
}

impl ComplaintTier {
    /// Display label of the tier.
    pub fn label(&self) -> &'static str {
        match self {
            Self::QuejaLeve => "Queja leve",
            Self::Reclamo => "Reclamo",
            Self::ReclamoCritico => "Reclamo crítico",
            Self::RiesgoLegal => "Riesgo legal",
        }
    }
}

macro_rules! categories {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Category of a pattern.
        ///
        /// Labels outside the known taxonomy are kept verbatim in
        /// [`Category::Unknown`] so that nothing is silently reclassified.
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum Category {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant,
            )+
            /// A label outside the known taxonomy
            Unknown(String),
        }

        impl Category {
            /// Wire name of the category.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $name,)+
                    Self::Unknown(raw) => raw.as_str(),
                }
            }

            fn from_canonical(key: &str) -> Option<Self> {
                match key {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

categories! {
    ProductoDefectuoso => "producto_defectuoso",
    ProblemaGeneral => "problema_general",
    ProductoNoFuncional => "producto_no_funcional",
    ProductoDanado => "producto_danado",
    ProductoIncompleto => "producto_incompleto",
    DemoraEntrega => "demora_entrega",
    EntregaFaltante => "entrega_faltante",
    EntregaPerdida => "entrega_perdida",
    Dano => "dano",
    ProblemaCalidad => "problema_calidad",
    Insatisfaccion => "insatisfaccion",
    MuyMalo => "muy_malo",
    Malo => "malo",
    Decepcion => "decepcion",
    Devolucion => "devolucion",
    CambioProducto => "cambio_producto",
    Desconfianza => "desconfianza",
    Fraude => "fraude",
    Engano => "engano",
    Confuso => "confuso",
    SolicitudAyuda => "solicitud_ayuda",
    QuejaLeve => "queja_leve",
    Reclamo => "reclamo",
    ReclamoCritico => "reclamo_critico",
    RiesgoLegal => "riesgo_legal",
    Custom => "custom",
}

impl Category {
    /// Parses a free-form label.
    ///
    /// Labels are folded before lookup, so `"Daño"`, `"dano"` and `" DAÑO "`
    /// all name the same category, and `"Reclamo crítico"` names
    /// `reclamo_critico`. Unrecognized labels become [`Category::Unknown`].
    pub fn parse(label: &str) -> Self {
        let key = canonical_key(label);
        match Self::from_canonical(&key) {
            Some(category) => category,
            None => {
                tracing::warn!(category = %label, "Unknown pattern category");
                Self::Unknown(label.trim().to_string())
            }
        }
    }

    /// Whether the label was outside the known taxonomy.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Collapses the category into one of the four complaint tiers.
    ///
    /// Categories without an explicit tier fall back to
    /// [`ComplaintTier::QuejaLeve`].
    pub fn tier(&self) -> ComplaintTier {
        match self {
            Self::ProductoNoFuncional | Self::Dano | Self::MuyMalo | Self::Reclamo => {
                ComplaintTier::Reclamo
            }
            Self::ProductoDanado
            | Self::EntregaFaltante
            | Self::EntregaPerdida
            | Self::ReclamoCritico => ComplaintTier::ReclamoCritico,
            Self::Fraude | Self::Engano | Self::RiesgoLegal => ComplaintTier::RiesgoLegal,
            _ => ComplaintTier::QuejaLeve,
        }
    }
}

/// Lowercase, strip accents, join words with underscores.
fn canonical_key(label: &str) -> String {
    let folder = Normalizer::new(NormalizationOptions {
        strip_diacritics: true,
        remove_punctuation: false,
        collapse_whitespace: true,
    });
    folder
        .normalize(label)
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Stable identifier, never reused
    pub id: u64,

    /// Literal text to search for; empty text never matches
    #[serde(rename = "pattern")]
    pub text: String,

    /// Category of the pattern
    pub category: Category,

    /// Alert level counted for every occurrence
    pub alert_level: AlertLevel,

    /// Message shown when the pattern matches
    pub alert_message: String,
}

impl Pattern {
    /// Builds a stored pattern from a validated draft.
    pub(crate) fn from_draft(id: u64, draft: PatternDraft) -> Self {
        Self {
            id,
            text: draft.pattern,
            category: draft.category,
            alert_level: draft.alert_level,
            alert_message: draft.alert_message,
        }
    }
}

/// Pattern fields without an id, as submitted by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDraft {
    /// Literal text to search for
    pub pattern: String,

    /// Category label
    pub category: Category,

    /// Alert level
    pub alert_level: AlertLevel,

    /// Message shown when the pattern matches
    #[serde(default)]
    pub alert_message: String,
}

impl PatternDraft {
    /// Creates a draft.
    pub fn new<P, C, M>(pattern: P, category: C, alert_level: AlertLevel, alert_message: M) -> Self
    where
        P: Into<String>,
        C: Into<Category>,
        M: Into<String>,
    {
        Self {
            pattern: pattern.into(),
            category: category.into(),
            alert_level,
            alert_message: alert_message.into(),
        }
    }

    /// Trims the text fields and checks their lengths.
    ///
    /// # Errors
    ///
    /// Returns [`DetectorError::Validation`] if the pattern or the alert
    /// message is too long.
    pub fn validated(self) -> DetectorResult<Self> {
        let pattern = self.pattern.trim().to_string();
        let alert_message = self.alert_message.trim().to_string();

        let pattern_len = pattern.chars().count();
        if pattern_len > MAX_PATTERN_LENGTH {
            return Err(DetectorError::Validation(format!(
                "pattern is {pattern_len} characters long, maximum is {MAX_PATTERN_LENGTH}"
            )));
        }

        let message_len = alert_message.chars().count();
        if message_len > MAX_ALERT_MESSAGE_LENGTH {
            return Err(DetectorError::Validation(format!(
                "alert_message is {message_len} characters long, maximum is {MAX_ALERT_MESSAGE_LENGTH}"
            )));
        }

        Ok(Self {
            pattern,
            alert_message,
            ..self
        })
    }
}
