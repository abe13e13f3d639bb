//! Pagination and sorting of the product listing.

use sea_orm::Order;
use strum::{Display, EnumString};
use validator::Validate;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::ListParams;
use crate::validation::first_message;

/// Columns a listing may be sorted by. Parsing is case-insensitive and
/// accepts both the wire names and their English equivalents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    #[default]
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "nombre", serialize = "name")]
    Name,
    #[strum(serialize = "descripcion", serialize = "description")]
    Description,
    #[strum(serialize = "cantidad", serialize = "quantity")]
    Quantity,
    #[strum(serialize = "precio", serialize = "price")]
    Price,
}

impl SortField {
    pub fn column(self) -> entity::Column {
        match self {
            Self::Id => entity::Column::Id,
            Self::Name => entity::Column::Name,
            Self::Description => entity::Column::Description,
            Self::Quantity => entity::Column::Quantity,
            Self::Price => entity::Column::Price,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Rows `first_row..=last_row` (1-based) of the sorted table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub first_row: u64,
    pub last_row: u64,
}

impl PageWindow {
    /// `None` when a row number exceeds `i64::MAX`, the widest offset the
    /// store accepts.
    pub fn new(page: u64, size: u64) -> Option<Self> {
        let first_row = page.checked_mul(size)?.checked_add(1)?;
        let last_row = page.checked_add(1)?.checked_mul(size)?;
        if i64::try_from(first_row.max(last_row)).is_err() {
            return None;
        }
        Some(Self { first_row, last_row })
    }

    pub fn offset(&self) -> u64 {
        self.first_row - 1
    }

    pub fn limit(&self) -> u64 {
        self.last_row + 1 - self.first_row
    }

    /// Apply the window to an already sorted slice.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(rows.len());
        let len = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        let end = start.saturating_add(len).min(rows.len());
        &rows[start..end]
    }
}

/// A validated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub size: u64,
    pub sort: SortField,
    pub direction: SortDirection,
    pub window: PageWindow,
}

impl ListQuery {
    pub fn from_params(params: &ListParams) -> ProductResult<Self> {
        params
            .validate()
            .map_err(|e| ProductError::InvalidArgument(first_message(&e)))?;

        let sort = match params.sort_by.as_deref().map(str::trim) {
            None | Some("") => SortField::default(),
            Some(raw) => raw.parse().map_err(|_| {
                ProductError::InvalidArgument(format!(
                    "Campo de ordenamiento no válido: '{raw}'. Valores permitidos: id, nombre, descripcion, cantidad, precio"
                ))
            })?,
        };

        let direction = match params.sort_dir.as_deref().map(str::trim) {
            None | Some("") => SortDirection::default(),
            Some(raw) => raw.parse().map_err(|_| {
                ProductError::InvalidArgument(format!(
                    "Dirección de ordenamiento no válida: '{raw}'. Valores permitidos: asc, desc"
                ))
            })?,
        };

        // Both are non-negative after validation
        let page = params.page as u64;
        let size = params.size as u64;
        let window = PageWindow::new(page, size).ok_or_else(|| {
            ProductError::InvalidArgument("Parámetros de paginación fuera de rango".to_string())
        })?;

        Ok(Self {
            page,
            size,
            sort,
            direction,
            window,
        })
    }
}

/// Escape `LIKE` wildcards so the term only matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
