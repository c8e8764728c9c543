//! Best-effort normalization of stored boards.
//!
//! Stored data may come from an older release, from a hand-edited file, or
//! from a write that was cut short. Instead of rejecting it, every field is
//! coerced into a valid value:
//!
//! | Field | Fallback |
//! |-------|----------|
//! | missing, duplicate or key-unsafe id | fresh id from the [`IdGenerator`] |
//! | board `name` | `Untitled board` |
//! | column `title` | `Column {n}` (1-based position) |
//! | colors, card `title`/`notes` | empty string |
//! | `minimized` | truthiness of whatever is there |
//! | `priority` | number or numeric string, clamped to `0..=5`, else 0 |
//! | `taskType` | `sub` unless exactly `main` |
//! | `icon` | `sword` unless a known icon |
//! | `patternType` | `default` unless a known type |
//! | missing `patternSeed` | fresh seed (an empty seed is kept) |
//! | `columns`/`cards` that are not arrays | empty |
//!
//! Entries that are not JSON objects are dropped. Board ids are unique in the
//! tree, column ids within their board and card ids within their column.

use std::collections::HashSet;
use std::sync::Arc;

use orcganizer_protocol::{Board, BoardTree, Card, Column, Icon, PatternType, Priority, TaskType};
use orcganizer_store::{IdGenerator, IdKind, is_key_safe_id};
use serde_json::{Map, Value};
use tracing::debug;

/// Name given to boards stored without one.
pub const UNTITLED_BOARD: &str = "Untitled board";

/// Builds a valid tree from raw stored boards.
///
/// # Examples
///
/// ```
/// use orcganizer_config::normalize::normalize_boards;
/// use orcganizer_protocol::{Icon, TaskType};
/// use orcganizer_store::SequentialIds;
/// use serde_json::json;
///
/// let raw = json!([{ "name": "Old", "columns": [{ "cards": [{ "title": "C1" }] }] }]);
/// let tree = normalize_boards(raw.as_array().unwrap(), &mut SequentialIds::new());
///
/// let card = &tree.boards[0].columns[0].cards[0];
/// assert_eq!(card.task_type, TaskType::Sub);
/// assert_eq!(card.icon, Icon::Sword);
/// assert_eq!(tree.boards[0].columns[0].title, "Column 1");
/// ```
pub fn normalize_boards(values: &[Value], ids: &mut dyn IdGenerator) -> BoardTree {
    let mut board_ids = HashSet::new();
    let boards = values
        .iter()
        .filter_map(|value| {
            let Some(object) = value.as_object() else {
                debug!("dropping stored board that is not an object");
                return None;
            };
            Some(Arc::new(normalize_board(object, ids, &mut board_ids)))
        })
        .collect();
    BoardTree { boards }
}

fn normalize_board(
    object: &Map<String, Value>,
    ids: &mut dyn IdGenerator,
    board_ids: &mut HashSet<String>,
) -> Board {
    let id = unique_id(object.get("id"), IdKind::Board, ids, board_ids);
    let mut board = Board::new(id, string_or(object.get("name"), UNTITLED_BOARD));
    board.minimized = truthy(object.get("minimized"));
    board.header_color = string_or(object.get("headerColor"), "");

    let mut column_ids = HashSet::new();
    board.columns = objects(object.get("columns"))
        .enumerate()
        .map(|(ci, column)| {
            Arc::new(normalize_column(column, ci, ids, &mut column_ids))
        })
        .collect();
    board
}

fn normalize_column(
    object: &Map<String, Value>,
    position: usize,
    ids: &mut dyn IdGenerator,
    column_ids: &mut HashSet<String>,
) -> Column {
    let id = unique_id(object.get("id"), IdKind::Column, ids, column_ids);
    let fallback_title = format!("Column {}", position + 1);
    let mut column = Column::new(id, string_or(object.get("title"), &fallback_title));
    column.color = string_or(object.get("color"), "");
    column.minimized = truthy(object.get("minimized"));
    let mut card_ids = HashSet::new();
    column.cards = objects(object.get("cards"))
        .map(|card| Arc::new(normalize_card(card, ids, &mut card_ids)))
        .collect();
    column
}

fn normalize_card(
    object: &Map<String, Value>,
    ids: &mut dyn IdGenerator,
    card_ids: &mut HashSet<String>,
) -> Card {
    let id = unique_id(object.get("id"), IdKind::Card, ids, card_ids);
    let pattern_seed =
        string_value(object.get("patternSeed")).unwrap_or_else(|| ids.pattern_seed());
    Card {
        id,
        title: string_or(object.get("title"), ""),
        notes: string_or(object.get("notes"), ""),
        priority: priority(object.get("priority")),
        task_type: object
            .get("taskType")
            .and_then(Value::as_str)
            .map(TaskType::parse_lenient)
            .unwrap_or_default(),
        icon: object
            .get("icon")
            .and_then(Value::as_str)
            .map(Icon::parse_lenient)
            .unwrap_or_default(),
        pattern_seed,
        pattern_type: object
            .get("patternType")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<PatternType>().ok())
            .unwrap_or_default(),
        minimized: truthy(object.get("minimized")),
    }
}

/// Iterates over the objects of an array, skipping anything else.
fn objects(value: Option<&Value>) -> impl Iterator<Item = &Map<String, Value>> {
    value
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Returns the stored id if it is usable in container keys and not yet
/// taken, else a fresh one.
fn unique_id(
    value: Option<&Value>,
    kind: IdKind,
    ids: &mut dyn IdGenerator,
    taken: &mut HashSet<String>,
) -> String {
    let id = match string_value(value) {
        Some(id) if is_key_safe_id(&id) && !taken.contains(&id) => id,
        stored => {
            let taken_ids = &*taken;
            let fresh = ids.fresh_id(kind, &|id: &str| taken_ids.contains(id));
            debug!(?stored, %fresh, "replacing stored id");
            fresh
        }
    };
    taken.insert(id.clone());
    id
}

/// Reads a string, also accepting numbers (ids written by hand are often numeric).
fn string_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    string_value(value).unwrap_or_else(|| fallback.to_string())
}

/// JavaScript-style truthiness.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn priority(value: Option<&Value>) -> Priority {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    // `as` saturates, and NaN becomes 0.
    Priority::clamped(number.map_or(0, |f| f as i64))
}

#[cfg(test)]
mod tests {
    use orcganizer_store::SequentialIds;
    use serde_json::json;

    use super::*;

    fn normalize(value: Value) -> BoardTree {
        normalize_boards(value.as_array().expect("array"), &mut SequentialIds::new())
    }

    #[test]
    fn well_formed_boards_are_kept_as_is() {
        let tree = orcganizer_protocol::dummy::sample_tree();
        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(normalize(value), tree);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let tree = normalize(json!([{ "columns": [{ "cards": [{}] }, {}] }]));

        let board = &tree.boards[0];
        assert_eq!(board.id, "b-1");
        assert_eq!(board.name, UNTITLED_BOARD);
        assert!(!board.minimized);
        assert_eq!(board.header_color, "");
        assert_eq!(board.columns[0].title, "Column 1");
        assert_eq!(board.columns[1].title, "Column 2");
        assert!(board.columns[1].is_empty());

        let card = &board.columns[0].cards[0];
        assert_eq!(card.title, "");
        assert_eq!(card.priority.value(), 0);
        assert_eq!(card.task_type, TaskType::Sub);
        assert_eq!(card.icon, Icon::Sword);
        assert_eq!(card.pattern_type, PatternType::Default);
        assert_eq!(card.pattern_seed, "s1");
    }

    #[test]
    fn unknown_enum_values_fall_back() {
        let tree = normalize(json!([{ "id": "b", "columns": [{ "id": "c", "cards": [
            { "id": "t", "taskType": "epic", "icon": "unicorn", "patternType": "plaid" }
        ]}]}]));
        let card = tree.card("b", "c", "t").unwrap();
        assert_eq!(card.task_type, TaskType::Sub);
        assert_eq!(card.icon, Icon::Sword);
        assert_eq!(card.pattern_type, PatternType::Default);
    }

    #[test]
    fn priority_coercion() {
        let tree = normalize(json!([{ "id": "b", "columns": [{ "id": "c", "cards": [
            { "id": "a", "priority": 9 },
            { "id": "b", "priority": "3" },
            { "id": "c", "priority": -2 },
            { "id": "d", "priority": "lots" },
            { "id": "e", "priority": 2.7 },
            { "id": "f", "priority": null }
        ]}]}]));
        let priorities: Vec<u8> = tree.boards[0].columns[0]
            .cards
            .iter()
            .map(|c| c.priority.value())
            .collect();
        assert_eq!(priorities, [5, 3, 0, 0, 2, 0]);
    }

    #[test]
    fn truthiness_of_minimized() {
        let tree = normalize(json!([
            { "id": "a", "minimized": 1 },
            { "id": "b", "minimized": "" },
            { "id": "c", "minimized": "yes" },
            { "id": "d", "minimized": 0 },
            { "id": "e", "minimized": [] }
        ]));
        let flags: Vec<bool> = tree.boards.iter().map(|b| b.minimized).collect();
        assert_eq!(flags, [true, false, true, false, true]);
    }

    #[test]
    fn duplicate_ids_are_replaced() {
        let tree = normalize(json!([
            { "id": "x", "columns": [
                { "id": "c" }, { "id": "c" }
            ]},
            { "id": "x" }
        ]));
        assert_eq!(tree.boards[0].id, "x");
        assert_ne!(tree.boards[1].id, "x");
        let columns = &tree.boards[0].columns;
        assert_eq!(columns[0].id, "c");
        assert_ne!(columns[1].id, "c");
    }

    #[test]
    fn card_ids_are_unique_per_column() {
        let tree = normalize(json!([{ "id": "b", "columns": [
            { "id": "c1", "cards": [{ "id": "t" }, { "id": "t" }] },
            { "id": "c2", "cards": [{ "id": "t" }] }
        ]}]));
        let first = &tree.boards[0].columns[0].cards;
        assert_eq!(first[0].id, "t");
        assert_ne!(first[1].id, "t");
        assert!(tree.contains_card("b", "c2", "t"));
    }

    #[test]
    fn ids_that_break_container_keys_are_replaced() {
        let tree = normalize(json!([
            { "id": "a:b", "columns": [{ "id": "x:y" }] },
            { "id": "boards-root" }
        ]));
        assert_eq!(tree.boards[0].id, "b-1");
        assert_eq!(tree.boards[0].columns[0].id, "col-2");
        assert_eq!(tree.boards[1].id, "b-3");
    }

    #[test]
    fn empty_seed_is_kept() {
        let tree = normalize(json!([{ "id": "b", "columns": [{ "id": "c", "cards": [
            { "id": "t", "patternSeed": "" }
        ]}]}]));
        assert_eq!(tree.card("b", "c", "t").unwrap().pattern_seed, "");
    }

    #[test]
    fn non_objects_are_dropped_and_non_arrays_become_empty() {
        let tree = normalize(json!([
            42,
            "board",
            { "id": "b", "columns": "nope" },
            { "id": "c", "columns": [null, { "id": "col", "cards": {} }] }
        ]));
        assert_eq!(tree.len(), 2);
        assert!(tree.boards[0].columns.is_empty());
        assert_eq!(tree.boards[1].columns.len(), 1);
        assert!(tree.boards[1].columns[0].is_empty());
    }

    #[test]
    fn numeric_ids_are_kept_as_strings() {
        let tree = normalize(json!([{ "id": 7 }]));
        assert_eq!(tree.boards[0].id, "7");
    }
}
