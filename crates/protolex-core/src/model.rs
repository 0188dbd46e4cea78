//! Record types for the protocol catalog.
//!
//! A [`Protocol`] is one documented protocol entry as authored by the
//! content team. Enumerated fields (`category`, `difficulty`,
//! `resources[].type`) are kept as the raw strings found in the source so the
//! schema validator can report values outside the closed taxonomy instead of
//! the deserializer rejecting the whole corpus. Use the typed accessors
//! ([`Protocol::category`], [`Protocol::difficulty`], [`Resource::kind`]) to
//! get the parsed value.
//!
//! Optional fields stay `Option`: `None` means the author omitted the field on
//! purpose, `Some(vec![])` is reported as malformed.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ============================================================================
// Closed taxonomies
// ============================================================================

/// Protocol category (closed set).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Web,
    Files,
    Email,
    Security,
    Transport,
    Network,
    Diagnostic,
    Infrastructure,
    Management,
    #[serde(rename = "Real Time")]
    RealTime,
    Microservices,
    #[serde(rename = "APIs")]
    Apis,
    Data,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 13] = [
        Category::Web,
        Category::Files,
        Category::Email,
        Category::Security,
        Category::Transport,
        Category::Network,
        Category::Diagnostic,
        Category::Infrastructure,
        Category::Management,
        Category::RealTime,
        Category::Microservices,
        Category::Apis,
        Category::Data,
    ];

    /// The label used in source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "Web",
            Category::Files => "Files",
            Category::Email => "Email",
            Category::Security => "Security",
            Category::Transport => "Transport",
            Category::Network => "Network",
            Category::Diagnostic => "Diagnostic",
            Category::Infrastructure => "Infrastructure",
            Category::Management => "Management",
            Category::RealTime => "Real Time",
            Category::Microservices => "Microservices",
            Category::Apis => "APIs",
            Category::Data => "Data",
        }
    }

    /// Exact-match lookup of a source label.
    ///
    /// This is the membership test the schema validator applies; use
    /// [`FromStr`] for forgiving user input.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Case-insensitive, ignores spaces, hyphens and underscores
    /// (`"real-time"` parses as [`Category::RealTime`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|c| squash(c.as_str()) == wanted)
            .ok_or_else(|| Error::parse(format!("unknown category: {s}")))
    }
}

/// Protocol difficulty level (closed set).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// The label used in source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    /// Exact-match lookup of a source label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == label)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Self::ALL
            .into_iter()
            .find(|d| squash(d.as_str()) == wanted)
            .ok_or_else(|| Error::parse(format!("unknown difficulty: {s}")))
    }
}

/// Kind of an external resource link (closed set).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Rfc,
    Documentation,
    Specification,
    Tutorial,
    Article,
    Video,
    Book,
    Tool,
}

impl ResourceType {
    /// Every resource type.
    pub const ALL: [ResourceType; 8] = [
        ResourceType::Rfc,
        ResourceType::Documentation,
        ResourceType::Specification,
        ResourceType::Tutorial,
        ResourceType::Article,
        ResourceType::Video,
        ResourceType::Book,
        ResourceType::Tool,
    ];

    /// The label used in source data.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Rfc => "rfc",
            ResourceType::Documentation => "documentation",
            ResourceType::Specification => "specification",
            ResourceType::Tutorial => "tutorial",
            ResourceType::Article => "article",
            ResourceType::Video => "video",
            ResourceType::Book => "book",
            ResourceType::Tool => "tool",
        }
    }

    /// Exact-match lookup of a source label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == label)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

// ============================================================================
// Protocol record
// ============================================================================

/// A code example attached to a protocol.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    pub title: String,
    pub code: String,
    pub explanation: String,
}

/// An external reference link.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub title: String,
    pub url: String,
    /// Raw resource type label; see [`Resource::kind`].
    #[serde(rename = "type")]
    pub kind: String,
}

impl Resource {
    /// Parsed resource type, or `None` if the label is outside the closed set.
    pub fn kind(&self) -> Option<ResourceType> {
        ResourceType::from_label(&self.kind)
    }
}

/// Which statement list of a protocol a piece of text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Advantage,
    Disadvantage,
    UseCase,
}

impl StatementKind {
    /// All statement kinds.
    pub const ALL: [StatementKind; 3] = [
        StatementKind::Advantage,
        StatementKind::Disadvantage,
        StatementKind::UseCase,
    ];

    /// Source field name, used in violation reports.
    pub fn field(&self) -> &'static str {
        match self {
            StatementKind::Advantage => "advantages",
            StatementKind::Disadvantage => "disadvantages",
            StatementKind::UseCase => "useCases",
        }
    }
}

/// One documented protocol.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Protocol {
    /// Lowercase slug, primary key.
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub full_description: String,
    /// Raw category label; see [`Protocol::category`].
    pub category: String,
    /// Raw difficulty label; see [`Protocol::difficulty`].
    pub difficulty: String,
    /// Port text. Numeric ports in the source are kept as their decimal text.
    #[serde(
        deserialize_with = "deserialize_port",
        skip_serializing_if = "Option::is_none"
    )]
    pub port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<String>>,
    pub advantages: Vec<String>,
    pub disadvantages: Vec<String>,
    pub use_cases: Vec<String>,
    /// `None` when the field is missing from the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Example>>,
    pub related_protocols: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<Resource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_considerations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modern_alternatives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagrams: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_commands: Option<serde_json::Value>,
}

impl Protocol {
    /// Parsed category, or `None` if the label is outside the closed set.
    pub fn category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    /// Parsed difficulty, or `None` if the label is outside the closed set.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::from_label(&self.difficulty)
    }

    /// Every port number mentioned in the `port` text.
    ///
    /// `"80/443"` and `"80, 443 (TLS)"` both yield `[80, 443]`. Numbers that
    /// do not fit a `u16` or are zero are ignored.
    pub fn ports(&self) -> Vec<u16> {
        let Some(text) = self.port.as_deref() else {
            return Vec::new();
        };
        let mut ports: Vec<u16> = text
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .filter_map(|run| run.parse::<u16>().ok())
            .filter(|p| *p != 0)
            .collect();
        ports.sort_unstable();
        ports.dedup();
        ports
    }

    /// The statement list of the given kind.
    pub fn statements(&self, kind: StatementKind) -> &[String] {
        match kind {
            StatementKind::Advantage => &self.advantages,
            StatementKind::Disadvantage => &self.disadvantages,
            StatementKind::UseCase => &self.use_cases,
        }
    }

    /// Examples, empty if the field was omitted.
    pub fn examples(&self) -> &[Example] {
        self.examples.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u64),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let repr = Option::<PortRepr>::deserialize(deserializer)?;
    Ok(repr.map(|r| match r {
        PortRepr::Number(n) => n.to_string(),
        PortRepr::Text(s) => s,
    }))
}

// ============================================================================
// Quiz question record
// ============================================================================

/// A multiple-choice quiz question about one protocol.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    /// Foreign key into [`Protocol::id`].
    pub protocol_id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
}

impl QuizQuestion {
    /// Text of the correct option, `None` if `correct_answer` is out of range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
        }
        assert_eq!(Category::from_label("real time"), None);
    }

    #[test]
    fn test_category_from_str_is_forgiving() {
        assert_eq!("real-time".parse::<Category>().unwrap(), Category::RealTime);
        assert_eq!("apis".parse::<Category>().unwrap(), Category::Apis);
        assert!("Telepathy".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_source_labels() {
        let json = serde_json::to_string(&Category::RealTime).unwrap();
        assert_eq!(json, "\"Real Time\"");
        let parsed: Category = serde_json::from_str("\"APIs\"").unwrap();
        assert_eq!(parsed, Category::Apis);
    }

    #[test]
    fn test_difficulty_from_label() {
        assert_eq!(
            Difficulty::from_label("Intermediate"),
            Some(Difficulty::Intermediate)
        );
        assert_eq!(Difficulty::from_label("intermediate"), None);
        assert_eq!(
            "advanced".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
    }

    #[test]
    fn test_protocol_deserialize_camel_case() {
        let json = r#"{
            "id": "afp",
            "name": "AFP",
            "shortDescription": "Apple Filing Protocol",
            "fullDescription": "File services for macOS.",
            "category": "Files",
            "difficulty": "Intermediate",
            "port": 548,
            "advantages": ["Native macOS metadata"],
            "disadvantages": ["Deprecated"],
            "useCases": ["Time Machine backups"],
            "examples": [{"title": "Mount", "code": "mount_afp afp://host/share /mnt", "explanation": "Mounts a share"}],
            "relatedProtocols": ["smb", "nfs"],
            "resources": [{"title": "Apple docs", "url": "https://developer.apple.com", "type": "documentation"}]
        }"#;

        let protocol: Protocol = serde_json::from_str(json).unwrap();

        assert_eq!(protocol.id, "afp");
        assert_eq!(protocol.short_description, "Apple Filing Protocol");
        assert_eq!(protocol.category(), Some(Category::Files));
        assert_eq!(protocol.difficulty(), Some(Difficulty::Intermediate));
        assert_eq!(protocol.port.as_deref(), Some("548"));
        assert_eq!(protocol.related_protocols, vec!["smb", "nfs"]);
        assert_eq!(protocol.examples().len(), 1);
        let resources = protocol.resources.as_ref().unwrap();
        assert_eq!(resources[0].kind(), Some(ResourceType::Documentation));
        assert!(protocol.versions.is_none());
    }

    #[test]
    fn test_protocol_missing_fields_default() {
        let protocol: Protocol = serde_json::from_str(r#"{"name": "Nameless"}"#).unwrap();

        assert!(protocol.id.is_empty());
        assert!(protocol.examples.is_none());
        assert!(protocol.port.is_none());
        assert!(protocol.category().is_none());
    }

    #[test]
    fn test_protocol_port_null() {
        let protocol: Protocol = serde_json::from_str(r#"{"id": "x", "port": null}"#).unwrap();
        assert!(protocol.port.is_none());
    }

    #[test]
    fn test_ports_parses_every_number() {
        let protocol = Protocol {
            port: Some("443, 80 (HTTP) / 80".to_string()),
            ..Default::default()
        };
        assert_eq!(protocol.ports(), vec![80, 443]);

        let protocol = Protocol {
            port: Some("N/A".to_string()),
            ..Default::default()
        };
        assert!(protocol.ports().is_empty());

        let protocol = Protocol {
            port: Some("0 or 70000".to_string()),
            ..Default::default()
        };
        assert!(protocol.ports().is_empty());
    }

    #[test]
    fn test_statements_by_kind() {
        let protocol = Protocol {
            advantages: vec!["fast".into()],
            disadvantages: vec!["old".into()],
            use_cases: vec!["backups".into()],
            ..Default::default()
        };
        assert_eq!(protocol.statements(StatementKind::Advantage), ["fast"]);
        assert_eq!(protocol.statements(StatementKind::Disadvantage), ["old"]);
        assert_eq!(protocol.statements(StatementKind::UseCase), ["backups"]);
        assert_eq!(StatementKind::UseCase.field(), "useCases");
    }

    #[test]
    fn test_protocol_serialization_skips_absent_optionals() {
        let protocol = Protocol {
            id: "dccp".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&protocol).unwrap();
        assert!(!json.contains("versions"));
        assert!(!json.contains("diagrams"));
        assert!(json.contains("\"relatedProtocols\""));
    }

    #[test]
    fn test_quiz_question_correct_option() {
        let question = QuizQuestion {
            options: vec!["a".into(), "b".into()],
            correct_answer: 1,
            ..Default::default()
        };
        assert_eq!(question.correct_option(), Some("b"));

        let broken = QuizQuestion {
            options: vec!["a".into()],
            correct_answer: 3,
            ..Default::default()
        };
        assert_eq!(broken.correct_option(), None);
    }

    #[test]
    fn test_quiz_question_camel_case() {
        let question: QuizQuestion = serde_json::from_str(
            r#"{"id":"q1","protocolId":"tcp","question":"?","options":["a","b"],"correctAnswer":0,"explanation":"e"}"#,
        )
        .unwrap();
        assert_eq!(question.protocol_id, "tcp");
        assert_eq!(question.correct_answer, 0);
    }
}
