//! Taxonomy Builder: flat records in, deduplicated and sorted tree out.
//!
//! Pure: no I/O, no clock, no randomness. Identical input yields an
//! identical tree, ids included.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::extraction::models::{Category, SkillRecord, Source};
use crate::taxonomy::tree::{skill_id, CategoryNode, SkillNode, SkillTree};

pub fn build(records: impl IntoIterator<Item = SkillRecord>) -> SkillTree {
    let mut grouped: BTreeMap<Category, BTreeMap<String, Merged>> = BTreeMap::new();

    for record in records {
        let key = record.normalized_name();
        if key.is_empty() {
            continue;
        }
        let bucket = grouped.entry(record.category).or_default();
        match bucket.get_mut(&key) {
            Some(existing) => existing.absorb(record),
            None => {
                bucket.insert(key, Merged::new(record));
            }
        }
    }

    let categories = grouped
        .into_iter()
        .filter(|(_, skills)| !skills.is_empty())
        .map(|(category, skills)| {
            let mut children: Vec<SkillNode> = skills
                .into_iter()
                .map(|(key, merged)| merged.into_node(&key))
                .collect();
            children.sort_by(compare_siblings);
            CategoryNode::new(category, children)
        })
        .collect();

    SkillTree { categories }
}

/// Descending weight, then case-insensitive label, then exact label.
fn compare_siblings(a: &SkillNode, b: &SkillNode) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
        .then_with(|| a.label.cmp(&b.label))
}

/// Accumulator for every record sharing (category, normalized name).
struct Merged {
    /// The highest-ranked record seen so far.
    best: SkillRecord,
    evidence: BTreeSet<String>,
}

impl Merged {
    fn new(record: SkillRecord) -> Self {
        let evidence = record.evidence.iter().cloned().collect();
        Self {
            best: record,
            evidence,
        }
    }

    fn absorb(&mut self, incoming: SkillRecord) {
        self.evidence.extend(incoming.evidence.iter().cloned());

        if outranks(&incoming, &self.best) {
            let previous = std::mem::replace(&mut self.best, incoming);
            if self.best.group.is_none() {
                self.best.group = previous.group;
            }
            if self.best.level.is_none() {
                self.best.level = previous.level;
            }
        } else {
            if self.best.group.is_none() {
                self.best.group = incoming.group;
            }
            if self.best.level.is_none() {
                self.best.level = incoming.level;
            }
        }
    }

    fn into_node(self, normalized_name: &str) -> SkillNode {
        let Merged { best, evidence } = self;
        SkillNode {
            id: skill_id(best.category, normalized_name),
            label: best.name,
            category: best.category,
            weight: best.confidence,
            source: best.source,
            group: best.group,
            level: best.level,
            evidence: evidence.into_iter().collect(),
            children: Vec::new(),
        }
    }
}

/// Higher confidence wins; on a tie AI beats keyword; otherwise the incumbent stays.
fn outranks(challenger: &SkillRecord, incumbent: &SkillRecord) -> bool {
    match challenger.confidence.total_cmp(&incumbent.confidence) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => challenger.source == Source::Ai && incumbent.source == Source::Keyword,
    }
}
