//! In-process counter registry.
//!
//! Counters are keyed by name plus labels parsed from `key:value` tags.
//! Labels are flattened into sorted key vectors to keep deterministic
//! ordering, and rendering groups series by family for the Prometheus text
//! exposition format.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use super::StatsSink;

type Labels = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// `resource:user` -> (`resource`, `user`); a bare tag becomes `tag=<tag>`.
fn labels_from_tags(tags: &[String]) -> Labels {
    let mut key: Labels = tags
        .iter()
        .map(|t| match t.split_once(':') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => ("tag".to_string(), t.clone()),
        })
        .collect();
    key.sort();
    key
}

fn sanitize_metric_name(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub struct CounterRegistry {
    namespace: String,
    map: DashMap<(String, Labels), AtomicU64>,
}

impl CounterRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            map: DashMap::new(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, name: &str, tags: &[String], v: u64) {
        let key = (name.to_string(), labels_from_tags(tags));
        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value, 0 when the series was never touched.
    pub fn get(&self, name: &str, tags: &[String]) -> u64 {
        let key = (name.to_string(), labels_from_tags(tags));
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across every series of one counter name.
    pub fn total(&self, name: &str) -> u64 {
        self.map
            .iter()
            .filter(|r| r.key().0 == name)
            .map(|r| r.value().load(Ordering::Relaxed))
            .sum()
    }

    /// Exposed name: `<namespace>_<name>_total`, dots become underscores.
    pub fn metric_name(&self, name: &str) -> String {
        format!("{}_{}_total", sanitize_metric_name(&self.namespace), sanitize_metric_name(name))
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut families: BTreeMap<String, Vec<(Labels, u64)>> = BTreeMap::new();
        for r in self.map.iter() {
            let (name, labels) = r.key();
            families
                .entry(self.metric_name(name))
                .or_default()
                .push((labels.clone(), r.value().load(Ordering::Relaxed)));
        }

        let mut out = String::new();
        for (name, mut series) in families {
            series.sort();
            let _ = writeln!(out, "# TYPE {} counter", name);
            for (labels, val) in series {
                let label_str = labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
            }
        }
        out
    }
}

impl StatsSink for CounterRegistry {
    fn increment(&self, name: &str, tags: &[String]) {
        self.add(name, tags, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(r: &str, m: &str) -> Vec<String> {
        vec![format!("resource:{r}"), format!("method:{m}")]
    }

    #[test]
    fn tag_order_does_not_split_series() {
        let reg = CounterRegistry::new("rpcmeter");
        reg.increment("query", &tags("user", "get"));
        reg.increment("query", &["method:get".to_string(), "resource:user".to_string()]);
        assert_eq!(reg.get("query", &tags("user", "get")), 2);
        assert_eq!(reg.get("error", &tags("user", "get")), 0);
    }

    #[test]
    fn render_groups_families_and_sanitizes_names() {
        let reg = CounterRegistry::new("rpcmeter");
        reg.increment("error.notfound", &tags("order", "cancel"));
        reg.increment("query", &tags("user", "get"));
        reg.increment("query", &tags("user", "get"));
        reg.increment("query", &["odd\"tag".to_string()]);

        let out = reg.render();
        assert!(out.contains("# TYPE rpcmeter_error_notfound_total counter\n"));
        assert!(out.contains(
            "rpcmeter_error_notfound_total{method=\"cancel\",resource=\"order\"} 1\n"
        ));
        assert!(out.contains("rpcmeter_query_total{method=\"get\",resource=\"user\"} 2\n"));
        assert!(out.contains("rpcmeter_query_total{tag=\"odd\\\"tag\"} 1\n"));
        assert_eq!(out.matches("# TYPE rpcmeter_query_total").count(), 1);
        assert_eq!(reg.total("query"), 3);
    }
}
