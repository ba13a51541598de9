//! Engine Module
//!
//! The document store engine: the whole database resident in memory,
//! mirrored to the data file after every mutation.
//!
//! ## Responsibilities
//! - Load the data file on open (lenient or strict)
//! - Exact-match find / update / delete over collections
//! - Assign `_id`, `_created`, `_modified`
//! - Persist the entire database after every state change

use std::path::Path;

use serde_json::Value;
use tracing::{debug, error, info, trace, warn};

use crate::clock::Clock;
use crate::command::{Command, Response};
use crate::config::{Config, LoadMode};
use crate::document::{
    apply_patch, is_reserved, matches, stamp_inserted, stamp_modified, Database, Document, Patch,
    Query, CREATED_FIELD, ID_FIELD, MODIFIED_FIELD,
};
use crate::error::Result;
use crate::storage::DataFile;

/// What happened when the engine loaded its data file
#[derive(Debug, Clone, PartialEq)]
pub enum LoadReport {
    /// No data file existed; the database starts empty
    Fresh,

    /// Data file loaded
    Loaded { collections: usize, documents: usize },

    /// Data file could not be loaded; the database starts empty.
    /// The file is left untouched until the next mutation overwrites it.
    Recovered { reason: String },
}

/// The document store engine
///
/// ## Concurrency Model: Single Owner
///
/// - Mutations take `&mut self`, reads take `&self`
/// - No file locking: one engine per data file, one process per data file
/// - To share an engine between threads, wrap it in [`crate::SharedEngine`]
///
/// ## Persistence
///
/// Every call that changes state rewrites the whole data file before
/// returning. Calls that change nothing (no matches, collection already
/// present, nothing to drop) do not touch the file.
///
/// If a save fails the in-memory change stays applied and the error is
/// returned; memory is then ahead of the data file until the next
/// successful save.
pub struct Engine {
    /// The data file this engine mirrors to
    file: DataFile,

    /// All collections, in creation order
    database: Database,

    /// Source of ids and timestamps
    clock: Clock,

    /// Outcome of the initial load
    load_report: LoadReport,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Validate config
    /// 2. Load the data file (absent → empty database)
    /// 3. On load failure: warn and start empty (lenient) or fail (strict)
    /// 4. Seed the clock past every stored id and timestamp
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let file = DataFile::new(&config);

        let (database, load_report) = match file.load() {
            Ok(Some(database)) => {
                let report = LoadReport::Loaded {
                    collections: database.len(),
                    documents: database.values().map(Vec::len).sum(),
                };
                (database, report)
            }
            Ok(None) => (Database::new(), LoadReport::Fresh),
            Err(e) => match config.load_mode {
                LoadMode::Strict => return Err(e),
                LoadMode::Lenient => {
                    warn!(path = %config.path.display(), error = %e, "starting with an empty database");
                    (
                        Database::new(),
                        LoadReport::Recovered {
                            reason: e.to_string(),
                        },
                    )
                }
            },
        };

        let clock = Self::seed_clock(&database);

        match &load_report {
            LoadReport::Loaded {
                collections,
                documents,
            } => info!(
                path = %config.path.display(),
                collections,
                documents,
                "database loaded"
            ),
            LoadReport::Fresh => info!(path = %config.path.display(), "new database"),
            LoadReport::Recovered { .. } => {}
        }

        Ok(Self {
            file,
            database,
            clock,
            load_report,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data file
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(Config::builder().path(path.as_ref()).build())
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        debug!(command = command.command_type().name(), "execute");

        match command {
            Command::Insert {
                collection,
                document,
            } => self.insert(&collection, document).map(Response::Inserted),
            Command::Find {
                collection,
                query,
                limit,
            } => Ok(Response::Documents(self.find_with_limit(
                &collection,
                query.as_ref(),
                limit,
            ))),
            Command::Update {
                collection,
                query,
                patch,
            } => self.update(&collection, &query, &patch).map(Response::Updated),
            Command::Delete { collection, query } => {
                self.delete(&collection, &query).map(Response::Deleted)
            }
            Command::Count { collection, query } => {
                Ok(Response::Count(self.count(&collection, query.as_ref())))
            }
            Command::List => Ok(Response::Collections(
                self.database
                    .iter()
                    .map(|(name, documents)| (name.clone(), documents.len()))
                    .collect(),
            )),
            Command::Drop { collection } => self.drop_collection(&collection).map(Response::Dropped),
            Command::Backup { path } => {
                let bytes = self.backup(&path)?;
                Ok(Response::BackedUp { path, bytes })
            }
        }
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// Ensure a collection exists
    ///
    /// Returns `true` (and persists) only if it was newly created.
    pub fn create_collection(&mut self, collection: &str) -> Result<bool> {
        if !self.ensure_collection(collection) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Names of all collections, in creation order
    pub fn list_collections(&self) -> Vec<String> {
        self.database.keys().cloned().collect()
    }

    /// Remove a collection and all its documents
    ///
    /// Returns `false` without touching the data file if it did not exist.
    pub fn drop_collection(&mut self, collection: &str) -> Result<bool> {
        let Some(documents) = self.database.shift_remove(collection) else {
            return Ok(false);
        };

        debug!(collection, documents = documents.len(), "collection dropped");
        self.persist()?;
        Ok(true)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert a document, creating the collection if needed
    ///
    /// Steps:
    /// 1. Stamp `_id`, `_created`, `_modified` (caller values are replaced)
    /// 2. Append to the collection
    /// 3. Persist the whole database
    pub fn insert(&mut self, collection: &str, mut document: Document) -> Result<String> {
        let tick = self.clock.tick();
        let id = stamp_inserted(&mut document, tick);

        self.ensure_collection(collection);
        self.database
            .entry(collection.to_string())
            .or_default()
            .push(document);

        debug!(collection, id = %id, "document inserted");
        self.persist()?;
        Ok(id)
    }

    /// Insert several documents with a single save
    ///
    /// Returns the assigned ids in input order.
    pub fn insert_many<I>(&mut self, collection: &str, documents: I) -> Result<Vec<String>>
    where
        I: IntoIterator<Item = Document>,
    {
        let created = self.ensure_collection(collection);
        let target = self.database.entry(collection.to_string()).or_default();

        let mut ids = Vec::new();
        for mut document in documents {
            ids.push(stamp_inserted(&mut document, self.clock.tick()));
            target.push(document);
        }

        if !created && ids.is_empty() {
            return Ok(ids);
        }

        debug!(collection, inserted = ids.len(), "documents inserted");
        self.persist()?;
        Ok(ids)
    }

    /// Merge `patch` into every document matching `query`
    ///
    /// Reserved fields in the patch are ignored. Matched documents get a new
    /// `_modified`. Returns the number of documents updated; zero means the
    /// data file was not touched.
    pub fn update(&mut self, collection: &str, query: &Query, patch: &Patch) -> Result<usize> {
        let Some(documents) = self.database.get_mut(collection) else {
            return Ok(0);
        };

        let clock = &mut self.clock;
        let mut tick = None;
        let mut updated = 0;
        for document in documents.iter_mut().filter(|d| matches(d, query)) {
            let tick = *tick.get_or_insert_with(|| clock.tick());
            apply_patch(document, patch);
            stamp_modified(document, tick);
            updated += 1;
        }

        if updated == 0 {
            return Ok(0);
        }

        let ignored: Vec<&str> = patch
            .keys()
            .map(String::as_str)
            .filter(|field| is_reserved(field))
            .collect();
        if !ignored.is_empty() {
            debug!(collection, ?ignored, "reserved fields in patch ignored");
        }

        debug!(collection, updated, "documents updated");
        self.persist()?;
        Ok(updated)
    }

    /// Remove every document matching `query`
    ///
    /// The empty query matches, and so removes, every document in the
    /// collection. Returns the number removed; zero means the data file was
    /// not touched.
    pub fn delete(&mut self, collection: &str, query: &Query) -> Result<usize> {
        let Some(documents) = self.database.get_mut(collection) else {
            return Ok(0);
        };

        let before = documents.len();
        documents.retain(|d| !matches(d, query));
        let deleted = before - documents.len();

        if deleted == 0 {
            return Ok(0);
        }

        debug!(collection, deleted, "documents deleted");
        self.persist()?;
        Ok(deleted)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Find documents matching `query` (all documents when `None` or empty)
    ///
    /// Returns copies in insertion order; a missing collection yields an
    /// empty vector.
    pub fn find(&self, collection: &str, query: Option<&Query>) -> Vec<Document> {
        self.matching(collection, query).cloned().collect()
    }

    /// Like [`Engine::find`], keeping at most `limit` results
    pub fn find_with_limit(
        &self,
        collection: &str,
        query: Option<&Query>,
        limit: Option<usize>,
    ) -> Vec<Document> {
        self.matching(collection, query)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    /// First document matching `query`
    pub fn find_one(&self, collection: &str, query: &Query) -> Option<Document> {
        self.matching(collection, Some(query)).next().cloned()
    }

    /// Number of documents matching `query` (all documents when `None`)
    pub fn count(&self, collection: &str, query: Option<&Query>) -> usize {
        self.matching(collection, query).count()
    }

    // =========================================================================
    // Backup
    // =========================================================================

    /// Copy the data file as it currently exists on disk to `destination`
    ///
    /// Returns the number of bytes copied. Fails if nothing has been saved yet.
    pub fn backup(&self, destination: impl AsRef<Path>) -> Result<u64> {
        let destination = destination.as_ref();
        let bytes = self.file.backup(destination)?;
        info!(destination = %destination.display(), bytes, "backup written");
        Ok(bytes)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Get the outcome of the initial load
    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn matching<'a>(
        &'a self,
        collection: &str,
        query: Option<&'a Query>,
    ) -> impl Iterator<Item = &'a Document> + 'a {
        self.database
            .get(collection)
            .into_iter()
            .flatten()
            .filter(move |document| query.map_or(true, |q| matches(document, q)))
    }

    /// Returns `true` if the collection was created
    fn ensure_collection(&mut self, collection: &str) -> bool {
        if self.database.contains_key(collection) {
            return false;
        }
        self.database.insert(collection.to_string(), Vec::new());
        debug!(collection, "collection created");
        true
    }

    fn persist(&self) -> Result<()> {
        match self.file.save(&self.database) {
            Ok(bytes) => {
                trace!(path = %self.file.path().display(), bytes, "database saved");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "save failed, in-memory state is ahead of the data file");
                Err(e)
            }
        }
    }

    /// Floor the clock at the highest stored id or timestamp
    fn seed_clock(database: &Database) -> Clock {
        let mut clock = Clock::new();
        for document in database.values().flatten() {
            if let Some(Value::String(id)) = document.get(ID_FIELD) {
                if let Ok(micros) = id.parse::<u64>() {
                    clock.observe(micros);
                }
            }
            for field in [CREATED_FIELD, MODIFIED_FIELD] {
                if let Some(seconds) = document.get(field).and_then(Value::as_f64) {
                    clock.observe_seconds(seconds);
                }
            }
        }
        clock
    }
}
