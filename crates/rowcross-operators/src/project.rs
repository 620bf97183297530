//! Projection: keep (`select`) or drop (`discard`) named columns.

use rowcross_core::prelude::*;

use crate::dispatch::generate;
use crate::step::{Step, Steps};
use crate::traits::{Operator, RowStream};

pub struct Select {
    names: Vec<String>,
}

impl Operator for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    /// Names missing from the row are skipped. Retained keys follow the
    /// declared name order; the scope is narrowed to the same keys.
    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        let kept: Vec<&str> = self
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| row.contains_key(name))
            .collect();
        generate(row.selected(&kept), scope.selected(&kept), rest)
    }
}

pub struct Discard {
    names: Vec<String>,
}

impl Operator for Discard {
    fn name(&self) -> &'static str {
        "discard"
    }

    /// Row and scope are checked independently, so a key present on only
    /// one side is still removed from that side.
    fn apply(&self, row: Row, scope: Scope, rest: Steps) -> RowStream {
        generate(row.without(&self.names), scope.without(&self.names), rest)
    }
}

pub fn select<I, S>(names: I) -> Step
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Step::operator(Select {
        names: names.into_iter().map(Into::into).collect(),
    })
}

pub fn discard<I, S>(names: I) -> Step
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Step::operator(Discard {
        names: names.into_iter().map(Into::into).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::ColumnBlock;
    use serde_json::json;

    fn run(steps: Vec<Step>) -> Vec<Row> {
        generate(Row::new(), Scope::new(), Steps::new(steps))
            .collect::<Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_select_reorders_and_narrows_scope() {
        let rows = run(vec![
            json!({"a": [1], "b": [2], "c": [3]}).into(),
            select(["c", "a", "nope"]),
            ColumnBlock::new()
                .col_fn("has_b", |scope| json!(scope.contains_key("b")))
                .into(),
        ]);
        assert_eq!(rows, vec![json!({"c": 3, "a": 1, "has_b": false})]);
        assert_eq!(rows[0].keys().collect::<Vec<_>>(), vec!["c", "a", "has_b"]);
    }

    #[test]
    fn test_select_skips_names_only_in_scope() {
        // after a group, "a" lives in the scope but not in the nested row
        let rows = run(vec![
            json!({"a": [1]}).into(),
            crate::group(
                "g",
                vec![
                    Step::from(json!({"d": [4]})),
                    select(["a", "d"]),
                ],
            ),
        ]);
        assert_eq!(rows, vec![json!({"a": 1, "g": [{"d": 4}]})]);
    }

    #[test]
    fn test_discard_removes_scope_only_keys() {
        let rows = run(vec![
            json!({"a": [1]}).into(),
            crate::group(
                "g",
                vec![
                    discard(["a"]),
                    ColumnBlock::new()
                        .col_fn("has_a", |scope| json!(scope.contains_key("a")))
                        .into(),
                ],
            ),
        ]);
        assert_eq!(rows, vec![json!({"a": 1, "g": [{"has_a": false}]})]);
    }
}
