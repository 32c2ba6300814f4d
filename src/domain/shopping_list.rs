//! Shopping list aggregation and rendering.
//!
//! Ingredient lines from every recipe in a cart are merged by display name and
//! measurement unit, not by ingredient id: two ingredient records that share a
//! name and a unit end up on a single line with the summed amount.

use std::collections::BTreeMap;
use std::fmt;

use super::entities::IngredientLine;

/// First line of every rendered shopping list.
pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";

/// One consolidated shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

/// Aggregated ingredients, ordered by name and then unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Groups `lines` by `(name, measurement_unit)` and sums the amounts.
    pub fn aggregate<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = IngredientLine>,
    {
        let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

        for line in lines {
            *totals
                .entry((line.name, line.measurement_unit))
                .or_insert(0) += i64::from(line.amount);
        }

        let items = totals
            .into_iter()
            .map(|((name, measurement_unit), total)| ShoppingItem {
                name,
                measurement_unit,
                total,
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for ShoppingList {
    /// Renders the header followed by `<n>. <name> - <total> <unit>.` lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SHOPPING_LIST_HEADER)?;
        for (index, item) in self.items.iter().enumerate() {
            write!(
                f,
                "\n{}. {} - {} {}.",
                index + 1,
                item.name,
                item.total,
                item.measurement_unit
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i64, name: &str, unit: &str, amount: i32) -> IngredientLine {
        IngredientLine {
            ingredient_id: id,
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_empty_list_renders_header_only() {
        let list = ShoppingList::aggregate(Vec::new());

        assert!(list.is_empty());
        assert_eq!(list.to_string(), "Shopping list:");
    }

    #[test]
    fn test_same_ingredient_is_summed() {
        let list = ShoppingList::aggregate(vec![line(1, "Salt", "g", 10), line(1, "Salt", "g", 5)]);

        assert_eq!(list.to_string(), "Shopping list:\n1. Salt - 15 g.");
    }

    #[test]
    fn test_distinct_records_with_same_name_and_unit_are_merged() {
        let list = ShoppingList::aggregate(vec![line(1, "Salt", "g", 10), line(2, "Salt", "g", 5)]);

        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].total, 15);
    }

    #[test]
    fn test_same_name_different_unit_stays_separate() {
        let list = ShoppingList::aggregate(vec![
            line(1, "Milk", "ml", 200),
            line(2, "Milk", "cup", 1),
        ]);

        assert_eq!(
            list.to_string(),
            "Shopping list:\n1. Milk - 1 cup.\n2. Milk - 200 ml."
        );
    }

    #[test]
    fn test_output_is_sorted_by_name() {
        let list = ShoppingList::aggregate(vec![
            line(3, "Sugar", "g", 50),
            line(1, "Eggs", "pcs", 2),
            line(2, "Flour", "g", 300),
        ]);

        assert_eq!(
            list.to_string(),
            "Shopping list:\n1. Eggs - 2 pcs.\n2. Flour - 300 g.\n3. Sugar - 50 g."
        );
    }

    #[test]
    fn test_order_does_not_depend_on_input_order() {
        let a = ShoppingList::aggregate(vec![line(1, "B", "g", 1), line(2, "A", "g", 2)]);
        let b = ShoppingList::aggregate(vec![line(2, "A", "g", 2), line(1, "B", "g", 1)]);

        assert_eq!(a, b);
    }

    #[test]
    fn test_totals_do_not_overflow_i32() {
        let list = ShoppingList::aggregate(vec![
            line(1, "Rice", "g", i32::MAX),
            line(2, "Rice", "g", i32::MAX),
        ]);

        assert_eq!(list.items()[0].total, 2 * i64::from(i32::MAX));
    }
}
