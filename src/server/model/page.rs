use crate::model::api::PageDto;

/// One page of domain models along with paging metadata.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.per_page > 0 {
            self.total.div_ceil(self.per_page)
        } else {
            0
        }
    }

    /// Converts the page into a DTO using the given item conversion.
    pub fn into_dto<D>(self, convert: impl FnMut(T) -> D) -> PageDto<D> {
        let total_pages = self.total_pages();
        PageDto {
            items: self.items.into_iter().map(convert).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages,
        }
    }
}
