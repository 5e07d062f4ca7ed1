#[derive(Debug, Copy, Clone)]
pub struct BenchCase {
    name: &'static str,
    group: HeaderGroup,
    header: HeaderFixture,
}

impl BenchCase {
    pub fn new(name: &'static str, group: HeaderGroup, header: HeaderFixture) -> Self {
        Self { name, group, header }
    }

    pub fn simple(name: &'static str, header: HeaderFixture) -> Self {
        Self::new(name, HeaderGroup::Simple, header)
    }

    pub fn browser(name: &'static str, header: HeaderFixture) -> Self {
        Self::new(name, HeaderGroup::Browser, header)
    }

    pub fn crowded(name: &'static str, header: HeaderFixture) -> Self {
        Self::new(name, HeaderGroup::Crowded, header)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> HeaderGroup {
        self.group
    }

    pub fn header(&self) -> &HeaderFixture {
        &self.header
    }

    pub fn header_value(&self) -> &'static str {
        self.header().value
    }
}

/// An `Accept` header value under benchmark.
#[derive(Debug, Copy, Clone)]
pub struct HeaderFixture {
    label: &'static str,
    value: &'static str,
}

impl HeaderFixture {
    pub const fn new(label: &'static str, value: &'static str) -> Self {
        Self { label, value }
    }

    pub fn value(&self) -> &'static str {
        self.value
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

#[derive(Clone, Copy, Debug)]
pub enum HeaderGroup {
    /// a single concrete entry, the API-client common case
    Simple,
    /// the multi-entry header real browsers send
    Browser,
    /// many entries with qualities and params
    Crowded,
}
