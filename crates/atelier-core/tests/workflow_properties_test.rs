//! Property tests for the order, custom-order, and stock-request state machines.

use proptest::prelude::*;

use atelier_core::errors::WorkflowError;
use atelier_core::workflow::{
    CustomOrderAction, CustomOrderStatus, OrderAction, OrderStatus, StockRequestAction,
    StockRequestStatus,
};

// =============================================================================
// Strategy helpers
// =============================================================================

fn order_action_strategy() -> impl Strategy<Value = OrderAction> {
    prop_oneof![
        Just(OrderAction::Approve),
        Just(OrderAction::Reject),
        Just(OrderAction::Process),
        "[ a-z./]{0,12}".prop_map(|tracking_link| OrderAction::Ship { tracking_link }),
        Just(OrderAction::Deliver),
        Just(OrderAction::Cancel),
    ]
}

fn custom_order_action_strategy() -> impl Strategy<Value = CustomOrderAction> {
    prop_oneof![
        Just(CustomOrderAction::Review),
        (-50.0f64..500.0, proptest::option::of("[ a-z]{0,8}")).prop_map(
            |(quoted_price, admin_notes)| CustomOrderAction::Quote {
                quoted_price,
                admin_notes,
            }
        ),
        Just(CustomOrderAction::Reject),
        Just(CustomOrderAction::Accept),
        Just(CustomOrderAction::Start),
        Just(CustomOrderAction::Complete),
    ]
}

/// The order edges, written out independently of the implementation.
fn order_edge_allowed(from: OrderStatus, action: &OrderAction) -> bool {
    use OrderStatus::*;
    match action {
        OrderAction::Approve | OrderAction::Reject => from == Pending,
        OrderAction::Process => from == Approved,
        OrderAction::Ship { .. } => from == Processing,
        OrderAction::Deliver => from == Shipped,
        OrderAction::Cancel => matches!(from, Pending | Approved | Processing | Shipped),
    }
}

// =============================================================================
// Order status
// =============================================================================

proptest! {
    #[test]
    fn order_walk_only_follows_table(actions in prop::collection::vec(order_action_strategy(), 0..20)) {
        let mut status = OrderStatus::Pending;
        let mut path = vec![status];
        for action in &actions {
            match status.apply(action) {
                Ok(t) => {
                    prop_assert!(order_edge_allowed(status, action));
                    prop_assert_eq!(t.from, status);
                    status = t.to;
                    path.push(status);
                }
                Err(WorkflowError::MissingTrackingLink) => {
                    let blank_link = matches!(
                        action,
                        OrderAction::Ship { tracking_link } if tracking_link.trim().is_empty()
                    );
                    prop_assert!(blank_link);
                }
                Err(WorkflowError::InvalidTransition { .. }) => {
                    prop_assert!(!order_edge_allowed(status, action));
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }

        // Delivered is only reachable through approved, processing, shipped in order.
        if let Some(pos) = path.iter().position(|s| *s == OrderStatus::Delivered) {
            prop_assert_eq!(
                &path[..=pos],
                &[
                    OrderStatus::Pending,
                    OrderStatus::Approved,
                    OrderStatus::Processing,
                    OrderStatus::Shipped,
                    OrderStatus::Delivered,
                ][..]
            );
        }
    }

    #[test]
    fn terminal_order_states_accept_nothing(action in order_action_strategy()) {
        for status in [OrderStatus::Rejected, OrderStatus::Delivered, OrderStatus::Cancelled] {
            prop_assert!(status.apply(&action).is_err());
        }
    }

    #[test]
    fn custom_order_walk_never_leaves_terminal(
        actions in prop::collection::vec(custom_order_action_strategy(), 0..20)
    ) {
        let mut status = CustomOrderStatus::Pending;
        for action in &actions {
            let was_terminal = status.is_terminal();
            if let Ok(t) = status.apply(action) {
                prop_assert!(!was_terminal);
                if let Some(quote) = &t.quote {
                    prop_assert!(quote.price >= 0.0);
                    prop_assert_eq!(t.to, CustomOrderStatus::Quoted);
                }
                status = t.to;
            }
        }
    }
}

// =============================================================================
// Examples
// =============================================================================

#[test]
fn ship_requires_non_blank_tracking_link() {
    let processing = OrderStatus::Processing;
    assert!(matches!(
        processing.apply(&OrderAction::Ship { tracking_link: "   ".into() }),
        Err(WorkflowError::MissingTrackingLink)
    ));
    let t = processing
        .apply(&OrderAction::Ship {
            tracking_link: " tracking.example.com/abc ".into(),
        })
        .unwrap();
    assert_eq!(t.to, OrderStatus::Shipped);
    assert_eq!(t.tracking_link.as_deref(), Some("tracking.example.com/abc"));
}

#[test]
fn cancel_allowed_until_delivery() {
    for status in [
        OrderStatus::Pending,
        OrderStatus::Approved,
        OrderStatus::Processing,
        OrderStatus::Shipped,
    ] {
        assert_eq!(
            status.apply(&OrderAction::Cancel).unwrap().to,
            OrderStatus::Cancelled
        );
    }
}

#[test]
fn quote_reaches_completed() {
    let mut status = CustomOrderStatus::Pending;
    for action in [
        CustomOrderAction::Review,
        CustomOrderAction::Quote {
            quoted_price: 1200.0,
            admin_notes: Some("two weeks".into()),
        },
        CustomOrderAction::Accept,
        CustomOrderAction::Start,
        CustomOrderAction::Complete,
    ] {
        status = status.apply(&action).unwrap().to;
    }
    assert_eq!(status, CustomOrderStatus::Completed);
}

#[test]
fn negative_quote_rejected() {
    let err = CustomOrderStatus::Reviewed
        .apply(&CustomOrderAction::Quote {
            quoted_price: -1.0,
            admin_notes: None,
        })
        .unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidQuote { .. }));
}

#[test]
fn order_action_json_shape() {
    let action: OrderAction =
        serde_json::from_str(r#"{"action":"ship","tracking_link":"x.io/1"}"#).unwrap();
    assert_eq!(
        action,
        OrderAction::Ship {
            tracking_link: "x.io/1".into()
        }
    );
    let action: CustomOrderAction =
        serde_json::from_str(r#"{"action":"quote","quoted_price":80}"#).unwrap();
    assert_eq!(
        action,
        CustomOrderAction::Quote {
            quoted_price: 80.0,
            admin_notes: None
        }
    );
}

#[test]
fn stock_request_steps_once() {
    let notified = StockRequestStatus::Pending
        .apply(StockRequestAction::Notify)
        .unwrap();
    assert_eq!(notified, StockRequestStatus::Notified);
    assert!(StockRequestStatus::Pending
        .apply(StockRequestAction::Fulfill)
        .is_err());
    assert!(StockRequestStatus::Fulfilled
        .apply(StockRequestAction::Notify)
        .is_err());
}

#[test]
fn status_strings_round_trip_through_from_str() {
    for status in OrderStatus::ALL {
        assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
    }
    assert!("in progress".parse::<CustomOrderStatus>().is_err());
    assert_eq!(
        "in_progress".parse::<CustomOrderStatus>().unwrap(),
        CustomOrderStatus::InProgress
    );
}
