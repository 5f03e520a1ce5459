//! Arguments passed by the bundler to plugin hooks.

#[derive(Debug, Clone)]
pub struct ResolveArgs<'a> {
    /// Module that contains the import, `None` for entry points
    pub importer: Option<&'a str>,
    pub specifier: &'a str,
}

#[derive(Debug, Clone)]
pub struct LoadArgs<'a> {
    pub id: &'a str,
}

impl<'a> ResolveArgs<'a> {
    pub fn new(specifier: &'a str) -> Self {
        Self {
            importer: None,
            specifier,
        }
    }

    pub fn with_importer(mut self, importer: &'a str) -> Self {
        self.importer = Some(importer);
        self
    }
}

impl<'a> LoadArgs<'a> {
    pub fn new(id: &'a str) -> Self {
        Self { id }
    }
}
