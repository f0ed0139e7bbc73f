use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::Duration;
use serde::{Deserialize, Serialize};

// HoldType defines the categories of hold Connect knows about. The serialized form is
// the label exchanged with Connect.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default, Serialize, Deserialize)]
pub enum HoldType {
    #[serde(rename = "Change Commitment Hold")]
    ChangeCommitment,
    #[default]
    #[serde(rename = "Consignment Hold")]
    Consignment,
    #[serde(rename = "Delinquent Mass Cancel Hold")]
    Delinquent,
    #[serde(rename = "E-Commerce Hold")]
    ECommerce,
    #[serde(rename = "No Money Hold")]
    NoMoney,
    #[serde(rename = "Reinstatement Hold")]
    Reinstatement,
    #[serde(rename = "Reservation Hold")]
    Reservation,
    #[serde(rename = "Sponsor Cancel Hold")]
    SponsorCancel,
    #[serde(rename = "Sub Child Hold")]
    SubChild,
}

impl HoldType {
    pub fn all() -> [HoldType; 9] {
        [
            HoldType::ChangeCommitment,
            HoldType::Consignment,
            HoldType::Delinquent,
            HoldType::ECommerce,
            HoldType::NoMoney,
            HoldType::Reinstatement,
            HoldType::Reservation,
            HoldType::SponsorCancel,
            HoldType::SubChild,
        ]
    }

    pub fn labels() -> Vec<&'static str> {
        HoldType::all().iter().map(HoldType::label).collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            HoldType::ChangeCommitment => "Change Commitment Hold",
            HoldType::Consignment => "Consignment Hold",
            HoldType::Delinquent => "Delinquent Mass Cancel Hold",
            HoldType::ECommerce => "E-Commerce Hold",
            HoldType::NoMoney => "No Money Hold",
            HoldType::Reinstatement => "Reinstatement Hold",
            HoldType::Reservation => "Reservation Hold",
            HoldType::SponsorCancel => "Sponsor Cancel Hold",
            HoldType::SubChild => "Sub Child Hold",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HoldType::ChangeCommitment => "change_commitment_hold",
            HoldType::Consignment => "consignment_hold",
            HoldType::Delinquent => "delinquent_hold",
            HoldType::ECommerce => "e_commerce_hold",
            HoldType::NoMoney => "no_money_hold",
            HoldType::Reinstatement => "reinstatement_hold",
            HoldType::Reservation => "reservation_hold",
            HoldType::SponsorCancel => "sponsor_cancel_hold",
            HoldType::SubChild => "sub_child_hold",
        }
    }

    // key of the configured default duration of this type
    pub fn duration_key(&self) -> String {
        format!("{}_duration", self.name())
    }

    // e-commerce holds are counted in minutes, every other type in days.
    // None when the amount does not fit in a Duration.
    pub fn duration(&self, amount: i64) -> Option<Duration> {
        match self {
            HoldType::ECommerce => Duration::try_minutes(amount),
            _ => Duration::try_days(amount),
        }
    }

    pub fn from_label(label: &str) -> Option<HoldType> {
        HoldType::all().into_iter().find(|t| t.label() == label)
    }
}

impl Display for HoldType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::hold::domain::types::HoldType;

    #[tokio::test]
    async fn test_should_resolve_labels() {
        for hold_type in HoldType::all() {
            assert_eq!(Some(hold_type), HoldType::from_label(hold_type.label()));
        }
        assert_eq!(9, HoldType::labels().len());
        assert_eq!(Some(HoldType::Delinquent), HoldType::from_label("Delinquent Mass Cancel Hold"));
    }

    #[tokio::test]
    async fn test_should_not_resolve_unknown_label() {
        assert_eq!(None, HoldType::from_label("Unknown Hold"));
        assert_eq!(None, HoldType::from_label("consignment hold"));
        assert_eq!(None, HoldType::from_label(""));
    }

    #[tokio::test]
    async fn test_should_build_duration_keys() {
        assert_eq!("e_commerce_hold_duration", HoldType::ECommerce.duration_key().as_str());
        assert_eq!("change_commitment_hold_duration", HoldType::ChangeCommitment.duration_key().as_str());
        assert_eq!(Some(Duration::minutes(15)), HoldType::ECommerce.duration(15));
        assert_eq!(Some(Duration::days(15)), HoldType::NoMoney.duration(15));
        assert_eq!(None, HoldType::NoMoney.duration(i64::MAX / 1000));
    }

    #[tokio::test]
    async fn test_should_serialize_as_label() {
        let json = serde_json::to_string(&HoldType::SponsorCancel).expect("should serialize");
        assert_eq!("\"Sponsor Cancel Hold\"", json.as_str());
        let parsed: HoldType = serde_json::from_str("\"E-Commerce Hold\"").expect("should parse");
        assert_eq!(HoldType::ECommerce, parsed);
        assert_eq!(HoldType::Consignment, HoldType::default());
    }
}
