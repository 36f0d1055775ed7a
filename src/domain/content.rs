use serde::{Deserialize, Serialize};

/// Number of headline stats shown on the about page.
pub const STAT_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub social: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub weekdays: String,
    #[serde(default)]
    pub sunday: String,
}

/// The singleton about/contact page record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "empty_stats", deserialize_with = "stats::deserialize")]
    pub stats: [Stat; STAT_COUNT],
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub working_hours: WorkingHours,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for ContentRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            stats: empty_stats(),
            contact_info: ContactInfo::default(),
            working_hours: WorkingHours::default(),
            extra: serde_json::Map::new(),
        }
    }
}

fn empty_stats() -> [Stat; STAT_COUNT] {
    Default::default()
}

mod stats {
    use serde::{Deserialize, Deserializer};

    use super::{STAT_COUNT, Stat};

    /// Pads a short list and truncates a long one to exactly `STAT_COUNT`.
    /// Truncated entries are gone from the next save, so they are logged.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<[Stat; STAT_COUNT], D::Error>
    where
        D: Deserializer<'de>,
    {
        let list = Vec::<Stat>::deserialize(deserializer)?;
        if list.len() > STAT_COUNT {
            let dropped: Vec<&str> = list[STAT_COUNT..].iter().map(|stat| stat.label.as_str()).collect();
            tracing::warn!(
                received = list.len(),
                kept = STAT_COUNT,
                ?dropped,
                "content record has extra stats; they will not be written back"
            );
        }
        let mut stats: [Stat; STAT_COUNT] = Default::default();
        for (slot, stat) in stats.iter_mut().zip(list) {
            *slot = stat;
        }
        Ok(stats)
    }
}

/// A single field assignment on the content record, addressed by group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Title,
    Subtitle,
    Description,
    StatValue(usize),
    StatLabel(usize),
    Address,
    Phone,
    Email,
    Social,
    Weekdays,
    Sunday,
}

impl ContentField {
    /// Returns `false` when a stat index falls outside the fixed stats array.
    pub fn apply(self, record: &mut ContentRecord, value: String) -> bool {
        match self {
            ContentField::Title => record.title = value,
            ContentField::Subtitle => record.subtitle = value,
            ContentField::Description => record.description = value,
            ContentField::StatValue(index) => match record.stats.get_mut(index) {
                Some(stat) => stat.value = value,
                None => return false,
            },
            ContentField::StatLabel(index) => match record.stats.get_mut(index) {
                Some(stat) => stat.label = value,
                None => return false,
            },
            ContentField::Address => record.contact_info.address = value,
            ContentField::Phone => record.contact_info.phone = value,
            ContentField::Email => record.contact_info.email = value,
            ContentField::Social => record.contact_info.social = value,
            ContentField::Weekdays => record.working_hours.weekdays = value,
            ContentField::Sunday => record.working_hours.sunday = value,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn decodes_nested_groups() {
        let raw = json!({
            "_id": "c1",
            "title": "About us",
            "subtitle": "Ride the hills",
            "description": "Family run since 2010",
            "stats": [
                {"value": "500+", "label": "Riders"},
                {"value": "12", "label": "ATVs"},
                {"value": "4.9", "label": "Rating"}
            ],
            "contactInfo": {"address": "Main St 1", "phone": "+355 69", "email": "a@b.c", "social": "@atv"},
            "workingHours": {"weekdays": "08-20", "sunday": "10-16"}
        });

        let record: ContentRecord = serde_json::from_value(raw).unwrap();
        assert_eq!(record.stats[1].label, "ATVs");
        assert_eq!(record.contact_info.email, "a@b.c");
        assert_eq!(record.working_hours.sunday, "10-16");
        assert_eq!(record.extra.get("_id"), Some(&json!("c1")));
    }

    #[test]
    fn stats_are_normalised_to_fixed_length() {
        let record: ContentRecord =
            serde_json::from_value(json!({"stats": [{"value": "1", "label": "a"}]})).unwrap();
        assert_eq!(record.stats[0].value, "1");
        assert_eq!(record.stats[2], Stat::default());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["stats"].as_array().map(Vec::len), Some(STAT_COUNT));
    }

    #[test]
    #[traced_test]
    fn extra_stats_are_dropped_with_a_warning() {
        let record: ContentRecord = serde_json::from_value(json!({"stats": [
            {"value": "1", "label": "a"},
            {"value": "2", "label": "b"},
            {"value": "3", "label": "c"},
            {"value": "4", "label": "Guides"}
        ]}))
        .unwrap();

        assert_eq!(record.stats[2].label, "c");
        assert!(logs_contain("extra stats"));
        assert!(logs_contain("Guides"));
    }

    #[test]
    fn stat_index_outside_array_is_rejected() {
        let mut record = ContentRecord::default();
        assert!(ContentField::StatLabel(2).apply(&mut record, "Tours".into()));
        assert!(!ContentField::StatValue(STAT_COUNT).apply(&mut record, "x".into()));
        assert_eq!(record.stats[2].label, "Tours");
    }
}
