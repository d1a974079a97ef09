//! Content registry.
//!
//! An explicit index of every content record, keyed by slug and built once
//! at startup. Routing resolves slugs through it.

use std::collections::{BTreeMap, HashMap};

use leafpress_core::{ContentRecord, NotFoundError, ValidationError, Violation};
use tracing::{debug, info};

/// Articles sharing one tag or category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonomyTerm {
    /// Term as first authored.
    pub name: String,

    /// Slugs of the articles carrying the term, in registry order.
    pub slugs: Vec<String>,
}

/// Taxonomy terms keyed by their URL slug.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    pub tags: BTreeMap<String, TaxonomyTerm>,

    pub categories: BTreeMap<String, TaxonomyTerm>,
}

impl TaxonomyIndex {
    fn add(terms: &mut BTreeMap<String, TaxonomyTerm>, name: &str, slug: &str) {
        let key = term_slug(name);
        if key.is_empty() {
            return;
        }
        let term = terms.entry(key).or_insert_with(|| TaxonomyTerm {
            name: name.to_string(),
            slugs: Vec::new(),
        });
        if !term.slugs.iter().any(|s| s == slug) {
            term.slugs.push(slug.to_string());
        }
    }
}

/// URL-safe slug for a taxonomy term.
pub fn term_slug(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Validated, immutable set of content records.
#[derive(Debug, Default)]
pub struct ContentRegistry {
    records: Vec<ContentRecord>,
    by_slug: HashMap<String, usize>,
    taxonomies: TaxonomyIndex,
    include_drafts: bool,
}

impl ContentRegistry {
    /// Build the registry, validating every record and slug uniqueness.
    ///
    /// Drafts are stored but only resolvable when `include_drafts` is set.
    pub fn new(records: Vec<ContentRecord>, include_drafts: bool) -> Result<Self, ValidationError> {
        let mut by_slug = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            record.validate()?;
            if by_slug.insert(record.meta.slug.clone(), index).is_some() {
                return Err(
                    ValidationError::new(Violation::DuplicateSlug).in_article(&record.meta.slug)
                );
            }
        }

        let mut registry = Self {
            records,
            by_slug,
            taxonomies: TaxonomyIndex::default(),
            include_drafts,
        };
        registry.index_taxonomies();

        info!(
            articles = registry.records.len(),
            published = registry.published().len(),
            tags = registry.taxonomies.tags.len(),
            categories = registry.taxonomies.categories.len(),
            "content registry built"
        );

        Ok(registry)
    }

    fn index_taxonomies(&mut self) {
        let mut index = TaxonomyIndex::default();
        for record in self.records.iter().filter(|r| self.is_visible(r)) {
            let slug = record.slug();
            for tag in &record.meta.tags {
                TaxonomyIndex::add(&mut index.tags, tag, slug);
            }
            if let Some(category) = &record.meta.category {
                TaxonomyIndex::add(&mut index.categories, category, slug);
            }
        }
        self.taxonomies = index;
    }

    fn is_visible(&self, record: &ContentRecord) -> bool {
        self.include_drafts || !record.meta.draft
    }

    /// Resolve a slug to exactly one published record.
    pub fn resolve(&self, slug: &str) -> Result<&ContentRecord, NotFoundError> {
        let record = self
            .by_slug
            .get(slug)
            .map(|&i| &self.records[i])
            .filter(|r| self.is_visible(r));

        match record {
            Some(record) => Ok(record),
            None => {
                debug!(slug, "slug did not resolve");
                Err(NotFoundError::new(slug))
            }
        }
    }

    /// Number of records, drafts included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record in load order, drafts included.
    pub fn iter(&self) -> impl Iterator<Item = &ContentRecord> {
        self.records.iter()
    }

    /// Published records, newest first; undated records last by title.
    pub fn published(&self) -> Vec<&ContentRecord> {
        let mut records: Vec<_> = self.records.iter().filter(|r| self.is_visible(r)).collect();
        sort_by_date(&mut records);
        records
    }

    /// Published records carrying a tag, newest first.
    pub fn by_tag(&self, tag: &str) -> Vec<&ContentRecord> {
        self.term_records(self.taxonomies.tags.get(&term_slug(tag)))
    }

    /// Published records in a category, newest first.
    pub fn by_category(&self, category: &str) -> Vec<&ContentRecord> {
        self.term_records(self.taxonomies.categories.get(&term_slug(category)))
    }

    fn term_records(&self, term: Option<&TaxonomyTerm>) -> Vec<&ContentRecord> {
        let mut records: Vec<_> = term
            .map(|t| t.slugs.iter().filter_map(|s| self.resolve(s).ok()).collect())
            .unwrap_or_default();
        sort_by_date(&mut records);
        records
    }

    /// Tag and category index over published records.
    pub fn taxonomies(&self) -> &TaxonomyIndex {
        &self.taxonomies
    }
}

fn sort_by_date(records: &mut [&ContentRecord]) {
    records.sort_by(|a, b| match (&b.meta.date, &a.meta.date) {
        (Some(b_date), Some(a_date)) => b_date
            .cmp(a_date)
            .then_with(|| a.meta.title.cmp(&b.meta.title)),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => a.meta.title.cmp(&b.meta.title),
    });
}
