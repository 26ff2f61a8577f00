use crate::domain::filter::value_objects::MAX_PAGE_SIZE;

pub mod entities;

#[derive(Clone, Debug, Default)]
pub struct OmsConfig {
    pub filter: FilterConfig,
}

#[derive(Clone, Debug)]
pub struct FilterConfig {
    /// Never raised above [`MAX_PAGE_SIZE`].
    pub max_page_size: u64,
    /// Extra query keys the normalizer drops before classifying filters.
    pub ignored_params: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_page_size: MAX_PAGE_SIZE,
            ignored_params: Vec::new(),
        }
    }
}
