//! Trading signal record and the create-signal request body

use serde::{Deserialize, Serialize};

use super::primitives::Confidence;
use super::types::{FieldDef, FieldType, Schema};
use super::Model;

pub const DEFAULT_TIMEFRAME: &str = "M15";

/// Traded instrument. Only gold against the dollar is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Symbol {
    #[default]
    #[serde(rename = "XAUUSD")]
    Xauusd,
}

impl Symbol {
    pub const LITERALS: &'static [&'static str] = &["XAUUSD"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Xauusd => "XAUUSD",
        }
    }
}

/// Recommended side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Buy,
    Sell,
}

impl Action {
    pub const LITERALS: &'static [&'static str] = &["BUY", "SELL"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
        }
    }
}

// Fields shared by the stored record and the request body, minus `symbol`.
const SIGNAL_BODY_FIELDS: [FieldDef; 8] = [
    FieldDef::required("action", FieldType::Enum(Action::LITERALS)),
    FieldDef::optional("entry", FieldType::Float),
    FieldDef::optional("stop_loss", FieldType::Float),
    FieldDef::optional("take_profit", FieldType::Float),
    FieldDef::optional(
        "confidence",
        FieldType::int_range(Confidence::MIN, Confidence::MAX),
    ),
    FieldDef::optional("timeframe", FieldType::String).with_default(DEFAULT_TIMEFRAME),
    FieldDef::optional("snapshot_url", FieldType::String),
    FieldDef::optional("note", FieldType::String),
];

const SIGNAL_FIELDS: [FieldDef; 9] = {
    let body = SIGNAL_BODY_FIELDS;
    [
        FieldDef::optional("symbol", FieldType::Enum(Symbol::LITERALS))
            .with_default("XAUUSD")
            .non_null(),
        body[0],
        body[1],
        body[2],
        body[3],
        body[4],
        body[5],
        body[6],
        body[7],
    ]
};

/// Stored signal shape.
pub static SIGNAL_SCHEMA: Schema = Schema {
    name: "signal",
    fields: &SIGNAL_FIELDS,
};

/// Body of `POST /api/signals`. A `symbol` key is ignored.
pub static SIGNAL_CREATE_SCHEMA: Schema = Schema {
    name: "signal_create_request",
    fields: &SIGNAL_BODY_FIELDS,
};

/// Trading signal for XAUUSD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: Symbol,
    pub action: Action,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub confidence: Option<Confidence>,
    pub timeframe: Option<String>,
    pub snapshot_url: Option<String>,
    pub note: Option<String>,
}

impl Signal {
    /// A bare signal with every optional field at its default.
    pub fn new(action: Action) -> Self {
        Self {
            symbol: Symbol::Xauusd,
            action,
            entry: None,
            stop_loss: None,
            take_profit: None,
            confidence: None,
            timeframe: Some(DEFAULT_TIMEFRAME.to_string()),
            snapshot_url: None,
            note: None,
        }
    }
}

impl Model for Signal {
    fn schema() -> &'static Schema {
        &SIGNAL_SCHEMA
    }
}

/// Validated create-signal request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SignalCreateRequest {
    pub action: Action,
    pub entry: Option<f64>,
    pub stop_loss: Option<f64>,
    pub take_profit: Option<f64>,
    pub confidence: Option<Confidence>,
    pub timeframe: Option<String>,
    pub snapshot_url: Option<String>,
    pub note: Option<String>,
}

impl SignalCreateRequest {
    pub fn into_signal(self) -> Signal {
        Signal {
            symbol: Symbol::Xauusd,
            action: self.action,
            entry: self.entry,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            confidence: self.confidence,
            timeframe: self.timeframe,
            snapshot_url: self.snapshot_url,
            note: self.note,
        }
    }
}

impl Model for SignalCreateRequest {
    fn schema() -> &'static Schema {
        &SIGNAL_CREATE_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_field_order() {
        let names: Vec<_> = SIGNAL_SCHEMA.field_names().collect();
        assert_eq!(
            names,
            vec![
                "symbol",
                "action",
                "entry",
                "stop_loss",
                "take_profit",
                "confidence",
                "timeframe",
                "snapshot_url",
                "note"
            ]
        );
        assert!(!SIGNAL_CREATE_SCHEMA.contains("symbol"));
    }

    #[test]
    fn test_literals_match_serde_names() {
        for action in [Action::Buy, Action::Sell] {
            assert_eq!(serde_json::to_value(action).unwrap(), json!(action.as_str()));
            assert!(Action::LITERALS.contains(&action.as_str()));
        }
        assert_eq!(
            serde_json::to_value(Symbol::Xauusd).unwrap(),
            json!(Symbol::Xauusd.as_str())
        );
    }

    #[test]
    fn test_defaults_applied() {
        let signal = Signal::from_json(&json!({"action": "BUY"})).unwrap();
        assert_eq!(signal, Signal::new(Action::Buy));
    }

    #[test]
    fn test_explicit_null_timeframe_stays_empty() {
        let signal = Signal::from_json(&json!({"action": "SELL", "timeframe": null})).unwrap();
        assert_eq!(signal.timeframe, None);
    }

    #[test]
    fn test_hold_action_rejected() {
        let err = SignalCreateRequest::from_json(&json!({"action": "HOLD"})).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].field, "action");
    }

    #[test]
    fn test_confidence_out_of_range_rejected() {
        for confidence in [-5, 101, 1000] {
            let err =
                SignalCreateRequest::from_json(&json!({"action": "BUY", "confidence": confidence}))
                    .unwrap_err();
            assert!(err.has_field("confidence"));
        }
    }

    #[test]
    fn test_all_violations_reported_together() {
        let err = SignalCreateRequest::from_json(&json!({
            "action": "HOLD",
            "confidence": 150,
            "entry": "1950"
        }))
        .unwrap_err();
        assert_eq!(err.violations.len(), 3);
    }

    #[test]
    fn test_request_ignores_symbol() {
        let req = SignalCreateRequest::from_json(&json!({"action": "BUY", "symbol": "EURUSD"}))
            .unwrap();
        assert_eq!(req.into_signal().symbol, Symbol::Xauusd);
    }

    #[test]
    fn test_request_carries_every_field() {
        let req = SignalCreateRequest::from_json(&json!({
            "action": "BUY",
            "entry": 1950.5,
            "stop_loss": 1940,
            "take_profit": 1970.25,
            "confidence": 80,
            "timeframe": "H1",
            "snapshot_url": "https://charts.example/1.png",
            "note": "breakout"
        }))
        .unwrap();
        let signal = req.into_signal();
        assert_eq!(signal.entry, Some(1950.5));
        assert_eq!(signal.stop_loss, Some(1940.0));
        assert_eq!(signal.confidence.map(Confidence::value), Some(80));
        assert_eq!(signal.timeframe.as_deref(), Some("H1"));
        assert_eq!(signal.note.as_deref(), Some("breakout"));
    }
}
