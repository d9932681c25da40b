//! Sample orders for trying the desk out

use crate::core::order::Order;

/// Six orders across cuisines, three of them unpaid within 5 KM
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order::new("ORD001", "Dragon Wok (Chinese)", 3, false, 2.5),
        Order::new("ORD002", "Burger Bros", 2, true, 5.2),
        Order::new("ORD003", "Tokyo Sushi Bar", 5, false, 1.8),
        Order::new("ORD004", "Spice Palace (Indian)", 4, false, 7.3),
        Order::new("ORD005", "Mama Mia Pizza", 2, true, 3.1),
        Order::new("ORD006", "Taco Loco (Mexican)", 3, false, 4.2),
    ]
}
