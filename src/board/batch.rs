/// Request shape, decided once at the boundary: one object or an array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch<T> {
    Single(T),
    Bulk(Vec<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Single,
    Bulk,
}

impl<T> Batch<T> {
    pub fn cardinality(&self) -> Cardinality {
        match self {
            Batch::Single(_) => Cardinality::Single,
            Batch::Bulk(_) => Cardinality::Bulk,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Batch::Single(_) => 1,
            Batch::Bulk(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert every element in order, stopping at the first failure.
    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<Batch<U>, E> {
        match self {
            Batch::Single(item) => Ok(Batch::Single(f(item)?)),
            Batch::Bulk(items) => items.into_iter().map(f).collect::<Result<Vec<U>, E>>().map(Batch::Bulk),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Batch::Single(item) => vec![item],
            Batch::Bulk(items) => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_map_stops_at_first_failure() {
        let mut seen = Vec::new();
        let result: Result<Batch<i32>, String> = Batch::Bulk(vec![1, 2, 3, 4]).try_map(|n| {
            seen.push(n);
            if n == 2 { Err(format!("bad {n}")) } else { Ok(n * 10) }
        });
        assert_eq!(result.unwrap_err(), "bad 2");
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn shape_survives_mapping() {
        let single = Batch::Single(1).try_map(|n| Ok::<_, ()>(n + 1)).unwrap();
        assert_eq!(single, Batch::Single(2));
        assert_eq!(single.cardinality(), Cardinality::Single);

        let bulk = Batch::Bulk(vec![1]).try_map(|n| Ok::<_, ()>(n + 1)).unwrap();
        assert_eq!(bulk.cardinality(), Cardinality::Bulk);
        assert_eq!(bulk.into_vec(), vec![2]);
    }
}
