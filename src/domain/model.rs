use crate::utils::error::{Result, ScoringError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_RADIUS_M: u32 = 500;
pub const MIN_RADIUS_M: u32 = 100;
pub const MAX_RADIUS_M: u32 = 5000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            address: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Address for display, falling back to the coordinates.
    pub fn display_address(&self) -> String {
        self.address
            .clone()
            .unwrap_or_else(|| format!("{}, {}", self.latitude, self.longitude))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndustryKind {
    #[serde(rename = "F&B")]
    FoodAndBeverage,
    Retail,
    Service,
}

impl IndustryKind {
    /// Place categories queried for this industry; the first is the competitor type.
    pub fn place_types(&self) -> &'static [&'static str] {
        match self {
            IndustryKind::FoodAndBeverage => &["restaurant", "cafe", "food"],
            IndustryKind::Retail => &["store", "shopping_mall", "clothing_store"],
            IndustryKind::Service => &["beauty_salon", "gym", "spa"],
        }
    }

    pub fn competitor_place_type(&self) -> &'static str {
        self.place_types()[0]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IndustryKind::FoodAndBeverage => "F&B",
            IndustryKind::Retail => "Retail",
            IndustryKind::Service => "Service",
        }
    }
}

impl fmt::Display for IndustryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndustryKind {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "f&b" | "fnb" | "food" => Ok(IndustryKind::FoodAndBeverage),
            "retail" => Ok(IndustryKind::Retail),
            "service" => Ok(IndustryKind::Service),
            _ => Err(ScoringError::validation(
                "industry",
                s,
                "expected one of F&B, Retail, Service",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Industry {
    pub kind: IndustryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl Industry {
    pub fn new(kind: IndustryKind) -> Self {
        Self {
            kind,
            sub_type: None,
        }
    }

    pub fn with_sub_type(mut self, sub_type: impl Into<String>) -> Self {
        self.sub_type = Some(sub_type.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            a: 0.30,
            b: 0.25,
            c: 0.30,
            d: 0.10,
            e: 0.05,
        }
    }
}

impl WeightVector {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64) -> Self {
        Self { a, b, c, d, e }
    }

    pub fn get(&self, pillar: PillarId) -> f64 {
        match pillar {
            PillarId::A => self.a,
            PillarId::B => self.b,
            PillarId::C => self.c,
            PillarId::D => self.d,
            PillarId::E => self.e,
        }
    }

    pub fn named(&self) -> [(&'static str, f64); 5] {
        [
            ("a", self.a),
            ("b", self.b),
            ("c", self.c),
            ("d", self.d),
            ("e", self.e),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.a + self.b + self.c + self.d + self.e
    }
}

impl FromStr for WeightVector {
    type Err = ScoringError;

    /// Parses "a,b,c,d,e".
    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ScoringError::validation("weights", s, e.to_string()))?;

        match values.as_slice() {
            [a, b, c, d, e] => Ok(WeightVector::new(*a, *b, *c, *d, *e)),
            _ => Err(ScoringError::validation(
                "weights",
                s,
                format!("expected 5 comma-separated weights, got {}", values.len()),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PillarId {
    A,
    B,
    C,
    D,
    E,
}

impl PillarId {
    pub const ALL: [PillarId; 5] = [PillarId::A, PillarId::B, PillarId::C, PillarId::D, PillarId::E];

    pub fn name(&self) -> &'static str {
        match self {
            PillarId::A => "Competition & Saturation",
            PillarId::B => "Traffic & Accessibility",
            PillarId::C => "Socio-Economic",
            PillarId::D => "Infrastructure & Environment",
            PillarId::E => "Macro & Legal Risk",
        }
    }

    /// Ordered (key, label) pairs of this pillar's sub-scores.
    pub fn sub_score_labels(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PillarId::A => &[
                ("A.1", "Competitor Density"),
                ("A.2", "Competitor Quality"),
                ("A.3", "Market Saturation"),
                ("A.4", "Competitive Advantage"),
            ],
            PillarId::B => &[
                ("B.1", "Foot Traffic"),
                ("B.2", "Public Transport"),
                ("B.3", "Vehicle Access"),
                ("B.4", "Visibility"),
            ],
            PillarId::C => &[
                ("C.1", "Customer Match"),
                ("C.2", "Population Density"),
                ("C.3", "Income Level"),
            ],
            PillarId::D => &[
                ("D.1", "Parking"),
                ("D.2", "Safety"),
                ("D.3", "Aesthetics"),
            ],
            PillarId::E => &[
                ("E.1", "Urban Planning Risk"),
                ("E.2", "Future Development"),
                ("E.3", "Economic Outlook"),
            ],
        }
    }
}

impl fmt::Display for PillarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            PillarId::A => "A",
            PillarId::B => "B",
            PillarId::C => "C",
            PillarId::D => "D",
            PillarId::E => "E",
        };
        f.write_str(letter)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub key: String,
    pub label: String,
    pub value: f64,
    /// Computed from sibling sub-scores instead of an independent measurement.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub derived: bool,
}

impl SubScore {
    pub fn new(key: &str, label: &str, value: f64) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value,
            derived: false,
        }
    }

    pub fn derived(key: &str, label: &str, value: f64) -> Self {
        Self {
            derived: true,
            ..Self::new(key, label, value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarResult {
    pub pillar: PillarId,
    pub name: String,
    pub score: f64,
    pub sub_scores: Vec<SubScore>,
    /// Audit payload; never read by the scoring logic.
    pub raw: serde_json::Value,
}

impl PillarResult {
    pub fn sub_score(&self, key: &str) -> Option<f64> {
        self.sub_scores
            .iter()
            .find(|s| s.key == key)
            .map(|s| s.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PillarOutcome {
    Scored(PillarResult),
    Degraded(PillarResult),
}

impl PillarOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, PillarOutcome::Degraded(_))
    }

    pub fn result(&self) -> &PillarResult {
        match self {
            PillarOutcome::Scored(r) | PillarOutcome::Degraded(r) => r,
        }
    }

    pub fn into_result(self) -> PillarResult {
        match self {
            PillarOutcome::Scored(r) | PillarOutcome::Degraded(r) => r,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Critical,
    High,
    Acceptable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    pub level: RiskTier,
    pub message: String,
    pub affected_score: String,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub timestamp: DateTime<Utc>,
    pub elapsed_ms: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<PillarId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: Uuid,
    pub location: Location,
    pub industry: Industry,
    pub radius_m: u32,
    pub pillars: Vec<PillarResult>,
    /// Weighted total before the risk gate.
    pub combined_score: f64,
    pub total_score: f64,
    pub risk_alert: Option<RiskAlert>,
    pub weights: WeightVector,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResult {
    pub fn pillar(&self, id: PillarId) -> Option<&PillarResult> {
        self.pillars.iter().find(|p| p.pillar == id)
    }

    pub fn risk_alert_raised(&self) -> bool {
        self.risk_alert.is_some()
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            id: self.id,
            address: self.location.display_address(),
            latitude: self.location.latitude,
            longitude: self.location.longitude,
            industry: self.industry.kind,
            total_score: self.total_score,
            has_risk_alert: self.risk_alert_raised(),
            created_at: self.metadata.timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub id: Uuid,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub industry: IndustryKind,
    pub total_score: f64,
    pub has_risk_alert: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

impl<T> Page<T> {
    /// Slices one page out of an already ordered list. `page` is 1-based.
    pub fn from_ordered(all: Vec<T>, page: usize, limit: usize) -> Self {
        let total = all.len();
        let pages = total.div_ceil(limit.max(1));
        let items = all
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(limit))
            .take(limit)
            .collect();
        Self {
            items,
            page,
            limit,
            total,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_industry_parse() {
        assert_eq!(
            "F&B".parse::<IndustryKind>().unwrap(),
            IndustryKind::FoodAndBeverage
        );
        assert_eq!("retail".parse::<IndustryKind>().unwrap(), IndustryKind::Retail);
        assert_eq!(" Service ".parse::<IndustryKind>().unwrap(), IndustryKind::Service);

        let err = "Mining".parse::<IndustryKind>().unwrap_err();
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_industry_place_types() {
        assert_eq!(IndustryKind::FoodAndBeverage.competitor_place_type(), "restaurant");
        assert_eq!(IndustryKind::Retail.competitor_place_type(), "store");
        assert_eq!(IndustryKind::Service.competitor_place_type(), "beauty_salon");
    }

    #[test]
    fn test_industry_serializes_with_display_names() {
        let json = serde_json::to_string(&IndustryKind::FoodAndBeverage).unwrap();
        assert_eq!(json, "\"F&B\"");
    }

    #[test]
    fn test_weight_vector_parse() {
        let w: WeightVector = "0.3, 0.25, 0.3, 0.1, 0.05".parse().unwrap();
        assert_eq!(w, WeightVector::default());
        assert!("0.5,0.5".parse::<WeightVector>().is_err());
        assert!("a,b,c,d,e".parse::<WeightVector>().is_err());
    }

    #[test]
    fn test_sub_score_labels_have_fixed_sizes() {
        let sizes: Vec<usize> = PillarId::ALL
            .iter()
            .map(|p| p.sub_score_labels().len())
            .collect();
        assert_eq!(sizes, vec![4, 4, 3, 3, 3]);
    }

    #[test]
    fn test_page_from_ordered() {
        let page = Page::from_ordered((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);

        let empty = Page::from_ordered(Vec::<u8>::new(), 1, 10);
        assert!(empty.items.is_empty());
        assert_eq!(empty.pages, 0);
    }

    #[test]
    fn test_page_far_beyond_end_is_empty() {
        let page = Page::from_ordered(vec![1, 2, 3], usize::MAX, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 1);

        let page = Page::from_ordered(vec![1, 2, 3], 0, 2);
        assert_eq!(page.items, vec![1, 2]);
    }

    #[test]
    fn test_location_display_address() {
        assert_eq!(Location::new(1.5, 2.5).display_address(), "1.5, 2.5");
        assert_eq!(
            Location::new(1.5, 2.5).with_address("Main St").display_address(),
            "Main St"
        );
    }
}
