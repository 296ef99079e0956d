use mesa_core::Table;

/// Tables that can seat `party_size`, ascending by capacity then table
/// number so assignment ties resolve the same way on every run.
///
/// An empty result is not an error; callers read it as "no slots possible".
pub fn eligible_tables(tables: &[Table], party_size: i32) -> Vec<Table> {
    let mut eligible: Vec<Table> = tables
        .iter()
        .filter(|t| t.capacity >= party_size)
        .cloned()
        .collect();
    eligible.sort_by_key(|t| (t.capacity, t.number));
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn table(number: i32, capacity: i32) -> Table {
        Table {
            id: Uuid::new_v4(),
            number,
            capacity,
        }
    }

    #[test]
    fn test_filters_by_minimum_capacity() {
        let tables = vec![table(1, 2), table(2, 4), table(3, 6)];

        let eligible = eligible_tables(&tables, 4);
        assert_eq!(eligible.len(), 2);
        assert!(eligible.iter().all(|t| t.capacity >= 4));
    }

    #[test]
    fn test_orders_ascending_by_capacity_then_number() {
        let tables = vec![table(7, 6), table(2, 4), table(5, 4), table(1, 8)];

        let eligible = eligible_tables(&tables, 2);
        let order: Vec<(i32, i32)> = eligible.iter().map(|t| (t.capacity, t.number)).collect();
        assert_eq!(order, vec![(4, 2), (4, 5), (6, 7), (8, 1)]);
    }

    #[test]
    fn test_oversized_party_yields_empty_set() {
        let tables = vec![table(1, 2), table(2, 4)];
        assert!(eligible_tables(&tables, 10).is_empty());
    }
}
