use serde::{Deserialize, Serialize};
use serde_json::Value;

use storefront_core::{DomainError, DomainResult, ItemId, Stock, StockLevels};

/// One line of a cart: a request for a single unit of `id`.
///
/// Any other fields the client sends along (name, price, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ItemId,
}

impl CartItem {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self { id: id.into() }
    }
}

/// Order document accepted by checkout.
///
/// `email` is informational only and kept as whatever JSON was sent; only the
/// cart can make an order fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
}

impl Order {
    /// Parse a raw request body into an order.
    pub fn from_json(body: &[u8]) -> DomainResult<Self> {
        serde_json::from_slice(body).map_err(|e| DomainError::malformed(e.to_string()))
    }
}

/// Outcome of a single processed cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineOutcome {
    pub item_id: ItemId,
    pub remaining: Stock,
}

/// Result of running a cart against a stock table: the prospective new table
/// plus one outcome per cart line, in cart order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOrder {
    pub levels: StockLevels,
    pub lines: Vec<LineOutcome>,
}

/// Compute the stock table that results from fulfilling `cart`.
///
/// Lines are applied in order against a working copy of `current`, one unit
/// each. A line whose item has `<= 0` units left (unknown items count as 0)
/// aborts the whole order with [`DomainError::InsufficientStock`]. `current`
/// is never modified; committing the result is the caller's job.
pub fn process_order(current: &StockLevels, cart: &[CartItem]) -> DomainResult<ProcessedOrder> {
    let mut levels = current.clone();
    let mut lines = Vec::with_capacity(cart.len());

    for item in cart {
        let remaining = match levels.get_mut(&item.id) {
            Some(stock) if *stock > 0 => {
                *stock -= 1;
                *stock
            }
            _ => return Err(DomainError::InsufficientStock(item.id.clone())),
        };

        lines.push(LineOutcome {
            item_id: item.id.clone(),
            remaining,
        });
    }

    Ok(ProcessedOrder { levels, lines })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seed() -> StockLevels {
        StockLevels::from([
            (ItemId::from("wrench"), 1),
            (ItemId::from("nails"), 1),
            (ItemId::from("hammer"), 1),
        ])
    }

    fn cart(ids: &[&str]) -> Vec<CartItem> {
        ids.iter().map(|id| CartItem::new(*id)).collect()
    }

    #[test]
    fn single_wrench_decrements_only_wrench() {
        let current = seed();
        let processed = process_order(&current, &cart(&["wrench"])).unwrap();

        assert_eq!(
            processed.levels,
            StockLevels::from([
                (ItemId::from("wrench"), 0),
                (ItemId::from("nails"), 1),
                (ItemId::from("hammer"), 1),
            ])
        );
        assert_eq!(
            processed.lines,
            vec![LineOutcome {
                item_id: ItemId::from("wrench"),
                remaining: 0,
            }]
        );
        // Input untouched.
        assert_eq!(current, seed());
    }

    #[test]
    fn duplicate_line_exhausts_working_copy_and_fails() {
        let current = seed();
        let err = process_order(&current, &cart(&["wrench", "wrench"])).unwrap_err();

        assert_eq!(err, DomainError::insufficient_stock("wrench"));
        assert_eq!(current, seed());
    }

    #[test]
    fn empty_cart_is_a_no_op() {
        let processed = process_order(&seed(), &[]).unwrap();
        assert_eq!(processed.levels, seed());
        assert!(processed.lines.is_empty());
    }

    #[test]
    fn unknown_item_is_rejected_as_out_of_stock() {
        let err = process_order(&seed(), &cart(&["nails", "saw"])).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("saw"));
    }

    #[test]
    fn negative_stock_is_treated_like_zero() {
        let current = StockLevels::from([(ItemId::from("wrench"), -3)]);
        let err = process_order(&current, &cart(&["wrench"])).unwrap_err();
        assert_eq!(err, DomainError::insufficient_stock("wrench"));
    }

    #[test]
    fn lines_report_remaining_stock_in_cart_order() {
        let current = StockLevels::from([(ItemId::from("nails"), 3), (ItemId::from("hammer"), 1)]);
        let processed = process_order(&current, &cart(&["nails", "hammer", "nails"])).unwrap();

        let remaining: Vec<_> = processed
            .lines
            .iter()
            .map(|l| (l.item_id.as_str(), l.remaining))
            .collect();
        assert_eq!(remaining, vec![("nails", 2), ("hammer", 0), ("nails", 1)]);
    }

    #[test]
    fn order_parses_with_missing_email_and_cart() {
        let order = Order::from_json(br#"{}"#).unwrap();
        assert_eq!(order.email, None);
        assert!(order.cart.is_empty());
    }

    #[test]
    fn order_ignores_extra_cart_fields() {
        let order = Order::from_json(
            br#"{"email":"a@b.c","cart":[{"id":"wrench","name":"Wrench","price":500}]}"#,
        )
        .unwrap();
        assert_eq!(order.email, Some(Value::from("a@b.c")));
        assert_eq!(order.cart, cart(&["wrench"]));
    }

    #[test]
    fn order_accepts_any_email_value() {
        let order = Order::from_json(br#"{"email":42,"cart":[{"id":"wrench"}]}"#).unwrap();
        assert_eq!(order.email, Some(Value::from(42)));
        assert_eq!(order.cart, cart(&["wrench"]));

        let order = Order::from_json(br#"{"email":null,"cart":[]}"#).unwrap();
        assert_eq!(order.email, None);
    }

    #[test]
    fn order_rejects_malformed_json() {
        let err = Order::from_json(b"not json").unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    #[test]
    fn order_rejects_cart_line_without_id() {
        let err = Order::from_json(br#"{"cart":[{"name":"Wrench"}]}"#).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    const ITEMS: [&str; 3] = ["wrench", "nails", "hammer"];

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: when every item has at least as many units as the cart
        /// asks for, the order succeeds and each count drops by its number of
        /// occurrences.
        #[test]
        fn sufficient_stock_decrements_by_occurrences(
            picks in prop::collection::vec(0usize..3, 0..12),
            headroom in prop::collection::vec(0i64..3, 3),
        ) {
            let counts: Vec<i64> = (0..3)
                .map(|i| picks.iter().filter(|p| **p == i).count() as i64)
                .collect();
            let current: StockLevels = (0..3)
                .map(|i| (ItemId::from(ITEMS[i]), counts[i] + headroom[i]))
                .collect();
            let cart: Vec<CartItem> = picks.iter().map(|p| CartItem::new(ITEMS[*p])).collect();

            let processed = process_order(&current, &cart).unwrap();

            prop_assert_eq!(processed.lines.len(), cart.len());
            for i in 0..3 {
                prop_assert_eq!(processed.levels[ITEMS[i]], headroom[i]);
            }
        }

        /// Property: a cart that touches an empty item fails, wherever the
        /// empty line sits, and the input table is left as it was.
        #[test]
        fn empty_item_anywhere_fails_without_touching_input(
            before in prop::collection::vec(0usize..2, 0..6),
            after in prop::collection::vec(0usize..2, 0..6),
        ) {
            let current = StockLevels::from([
                (ItemId::from("wrench"), 100),
                (ItemId::from("nails"), 100),
                (ItemId::from("hammer"), 0),
            ]);
            let mut cart: Vec<CartItem> = before.iter().map(|p| CartItem::new(ITEMS[*p])).collect();
            cart.push(CartItem::new("hammer"));
            cart.extend(after.iter().map(|p| CartItem::new(ITEMS[*p])));

            let snapshot = current.clone();
            let err = process_order(&current, &cart).unwrap_err();

            prop_assert_eq!(err, DomainError::insufficient_stock("hammer"));
            prop_assert_eq!(current, snapshot);
        }
    }
}
