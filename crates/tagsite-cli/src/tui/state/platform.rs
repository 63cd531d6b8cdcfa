//! Platform selector state

use tagsite_core::Platform;

/// A cycling choice over the configured platforms
#[derive(Debug, Clone)]
pub struct PlatformSelect {
    options: Vec<Platform>,
    index: usize,
}

impl PlatformSelect {
    pub fn new(options: &[Platform], initial: &Platform) -> Self {
        let mut options = options.to_vec();
        if options.is_empty() {
            options.push(Platform::default());
        }
        let mut select = Self { options, index: 0 };
        select.select(initial);
        select
    }

    pub fn current(&self) -> &Platform {
        &self.options[self.index]
    }

    pub fn options(&self) -> &[Platform] {
        &self.options
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.options.len();
    }

    pub fn prev(&mut self) {
        self.index = (self.index + self.options.len() - 1) % self.options.len();
    }

    /// Select `platform`, adding it when it is not one of the options
    pub fn select(&mut self, platform: &Platform) {
        match self.options.iter().position(|p| p == platform) {
            Some(idx) => self.index = idx,
            None => {
                self.options.push(platform.clone());
                self.index = self.options.len() - 1;
            }
        }
    }
}
