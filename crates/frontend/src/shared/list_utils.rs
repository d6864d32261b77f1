/// Utilitários de listas: busca, ordenação e indicador de ordenação
use std::cmp::Ordering;

/// Tipos que podem ser filtrados pela caixa de busca
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Tipos que podem ser ordenados por coluna
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Ordena a lista pelo campo indicado
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Filtra pela busca; menos de 2 caracteres não filtra
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.chars().count() < 2 {
        return items;
    }
    let needle = filter.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.matches_filter(&needle))
        .collect()
}

/// Busca sem diferenciar maiúsculas; `needle` já vem em minúsculas
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Indicador de ordenação para o cabeçalho
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Estado de ordenação comum às listas
#[derive(Clone, Debug, PartialEq)]
pub struct SortState {
    pub field: String,
    pub ascending: bool,
}

impl SortState {
    pub fn new(field: &str, ascending: bool) -> Self {
        Self {
            field: field.to_string(),
            ascending,
        }
    }

    /// Clique no cabeçalho: mesma coluna inverte, outra coluna começa ascendente
    pub fn toggle(&mut self, field: &str) {
        if self.field == field {
            self.ascending = !self.ascending;
        } else {
            self.field = field.to_string();
            self.ascending = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        value: f64,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "name" => cmp_ci(self.name, other.name),
                "value" => cmp_f64(self.value, other.value),
                _ => Ordering::Equal,
            }
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.name, filter)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "moldura caixa", value: 30.0 },
            Row { name: "Espelho", value: 10.0 },
            Row { name: "Moldura lisa", value: 20.0 },
        ]
    }

    #[test]
    fn sorts_both_ways() {
        let mut items = rows();
        sort_list(&mut items, "value", true);
        assert_eq!(items[0].name, "Espelho");
        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "Moldura lisa");
    }

    #[test]
    fn filters_case_insensitively() {
        assert_eq!(filter_list(rows(), "MOLD").len(), 2);
        assert_eq!(filter_list(rows(), "m").len(), 3);
        assert!(filter_list(rows(), "vidro").is_empty());
    }

    #[test]
    fn sort_state_toggle() {
        let mut s = SortState::new("name", true);
        s.toggle("name");
        assert!(!s.ascending);
        s.toggle("value");
        assert_eq!(s, SortState::new("value", true));
        assert_eq!(get_sort_indicator(&s.field, "value", s.ascending), " ▲");
        assert_eq!(get_sort_indicator(&s.field, "name", s.ascending), " ⇅");
    }
}
