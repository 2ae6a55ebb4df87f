//! Typed replacements for the numeric and string codes the API uses.
//!
//! Each enum owns the single translation table between wire code and display label.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::de::Loose;

/// Moderation state of a listing (`property_status` on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    #[default]
    Review,
    Approved,
    Rejected,
    Deleted,
    /// A code outside the table, or [`ReviewStatus::UNKNOWN_CODE`] for unrecognised text.
    Other(i64),
}

impl ReviewStatus {
    /// Code kept for a status the API sent as text nobody recognises.
    pub const UNKNOWN_CODE: i64 = -1;

    pub const ALL: [Self; 4] = [Self::Review, Self::Approved, Self::Rejected, Self::Deleted];

    pub const fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Review,
            1 => Self::Approved,
            2 => Self::Rejected,
            3 => Self::Deleted,
            other => Self::Other(other),
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Review => 0,
            Self::Approved => 1,
            Self::Rejected => 2,
            Self::Deleted => 3,
            Self::Other(code) => code,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Review => "Review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Deleted => "Deleted",
            Self::Other(_) => "Unknown",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl Serialize for ReviewStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ReviewStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Some(raw) = Option::<Loose>::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        if let Some(code) = raw.as_code() {
            return Ok(Self::from_code(code));
        }
        let text = raw.into_string();
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_label(&text).unwrap_or_else(|| {
            log::warn!("unknown review status '{text}'");
            Self::Other(Self::UNKNOWN_CODE)
        }))
    }
}

/// Payment state of a subscription (`payment_status` on the wire).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Rejected,
    Processing,
    Other(String),
}

impl PaymentStatus {
    pub const KNOWN: [Self; 4] = [
        Self::Pending,
        Self::Success,
        Self::Rejected,
        Self::Processing,
    ];

    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "success" => Self::Success,
            "rejected" => Self::Rejected,
            "processing" => Self::Processing,
            _ => Self::Other(raw.to_owned()),
        }
    }

    pub fn wire(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Processing => "processing",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Success => "Success",
            Self::Rejected => "Rejected",
            Self::Processing => "Processing",
            Self::Other(raw) => raw,
        }
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .map(|raw| Self::from_wire(&raw.into_string()))
            .unwrap_or_default())
    }
}

/// Account type of the user behind a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserType {
    Admin,
    User,
    Builder,
    Agent,
    Owner,
    ChannelPartner,
    Manager,
    Telecaller,
    MarketingExecutive,
    CustomerSupport,
    #[default]
    Unknown,
}

impl UserType {
    pub const ALL: [Self; 10] = [
        Self::Admin,
        Self::User,
        Self::Builder,
        Self::Agent,
        Self::Owner,
        Self::ChannelPartner,
        Self::Manager,
        Self::Telecaller,
        Self::MarketingExecutive,
        Self::CustomerSupport,
    ];

    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Admin,
            2 => Self::User,
            3 => Self::Builder,
            4 => Self::Agent,
            5 => Self::Owner,
            6 => Self::ChannelPartner,
            7 => Self::Manager,
            8 => Self::Telecaller,
            9 => Self::MarketingExecutive,
            10 => Self::CustomerSupport,
            _ => Self::Unknown,
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Admin => 1,
            Self::User => 2,
            Self::Builder => 3,
            Self::Agent => 4,
            Self::Owner => 5,
            Self::ChannelPartner => 6,
            Self::Manager => 7,
            Self::Telecaller => 8,
            Self::MarketingExecutive => 9,
            Self::CustomerSupport => 10,
            Self::Unknown => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
            Self::Builder => "Builder",
            Self::Agent => "Agent",
            Self::Owner => "Owner",
            Self::ChannelPartner => "Channel Partner",
            Self::Manager => "Manager",
            Self::Telecaller => "Telecaller",
            Self::MarketingExecutive => "Marketing Executive",
            Self::CustomerSupport => "Customer Support",
            Self::Unknown => "Unknown",
        }
    }

    pub fn labels() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(Self::label)
    }
}

impl Serialize for UserType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for UserType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<Loose>::deserialize(deserializer)?
            .and_then(|raw| raw.as_code())
            .map(Self::from_code)
            .unwrap_or_default())
    }
}

/// Whether a place is offered in location pickers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlaceStatus {
    #[default]
    Active,
    Inactive,
}

impl PlaceStatus {
    pub const ALL: [Self; 2] = [Self::Active, Self::Inactive];

    pub const fn code(self) -> i64 {
        match self {
            Self::Active => 1,
            Self::Inactive => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Accepts `1`/`0` as well as the labels, for spreadsheet cells.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw == "1" || raw.eq_ignore_ascii_case("active") {
            Some(Self::Active)
        } else if raw == "0" || raw.eq_ignore_ascii_case("inactive") {
            Some(Self::Inactive)
        } else {
            None
        }
    }
}

impl Serialize for PlaceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for PlaceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<Loose>::deserialize(deserializer)?;
        Ok(raw
            .and_then(|raw| Self::parse(&raw.into_string()))
            .unwrap_or(Self::Inactive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_status_accepts_numbers_and_numeric_strings() {
        let parsed: Vec<ReviewStatus> = serde_json::from_str(r#"[0, "1", 2, "3", 9]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ReviewStatus::Review,
                ReviewStatus::Approved,
                ReviewStatus::Rejected,
                ReviewStatus::Deleted,
                ReviewStatus::Other(9)
            ]
        );
    }

    #[test]
    fn review_status_serializes_to_its_code() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::Rejected).unwrap(),
            "2"
        );
    }

    #[test]
    fn review_status_tolerates_blank_and_unknown_text() {
        let parsed: Vec<ReviewStatus> =
            serde_json::from_str(r#"["approved", "", "  ", "pending review", null]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ReviewStatus::Approved,
                ReviewStatus::Review,
                ReviewStatus::Review,
                ReviewStatus::Other(ReviewStatus::UNKNOWN_CODE),
                ReviewStatus::Review,
            ]
        );
    }

    #[test]
    fn payment_status_keeps_unknown_values() {
        let parsed: Vec<PaymentStatus> =
            serde_json::from_str(r#"["SUCCESS", "pending", "refunded", null]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                PaymentStatus::Success,
                PaymentStatus::Pending,
                PaymentStatus::Other("refunded".to_owned()),
                PaymentStatus::Pending
            ]
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Rejected).unwrap(),
            r#""rejected""#
        );
    }

    #[test]
    fn user_type_table() {
        assert_eq!(UserType::from_code(4).label(), "Agent");
        assert_eq!(UserType::from_code(6).label(), "Channel Partner");
        assert_eq!(UserType::from_code(42).label(), "Unknown");
        let parsed: UserType = serde_json::from_str(r#""10""#).unwrap();
        assert_eq!(parsed, UserType::CustomerSupport);
        assert_eq!(UserType::labels().count(), 10);
    }

    #[test]
    fn place_status_parses_cells() {
        assert_eq!(PlaceStatus::parse("Active"), Some(PlaceStatus::Active));
        assert_eq!(PlaceStatus::parse(" 0 "), Some(PlaceStatus::Inactive));
        assert_eq!(PlaceStatus::parse("maybe"), None);
        let parsed: PlaceStatus = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, PlaceStatus::Active);
    }
}
