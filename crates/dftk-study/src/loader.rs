//! Loading a study from its directory on disk.
//!
//! A DataFax study directory keeps its configuration under `lib/`. Every
//! file is optional: a missing file is normal for studies that do not use
//! the feature, and an unreadable or malformed one is logged and skipped so
//! that the rest of the study still loads.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use crate::error::{Result, StudyError};
use crate::study::Study;

pub const LIB_DIR: &str = "lib";
pub const SERVER_CONFIG_FILE: &str = "DFserver.cf";
pub const SETUP_FILE: &str = "DFsetup";
pub const VISIT_MAP_FILE: &str = "DFvisit_map";
pub const PAGE_MAP_FILE: &str = "DFpage_map";
pub const MISSING_MAP_FILE: &str = "DFmissing_map";
pub const CENTERS_FILE: &str = "DFcenters";
pub const COUNTRIES_FILE: &str = "DFcountries";
pub const DOMAIN_MAP_FILE: &str = "DFdomain_map";

impl Study {
    /// Build a study from the files under `dir/lib`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut study = Study::new();
        study.load_from_dir(dir)?;
        Ok(study)
    }

    /// Load every `lib/` file present in `dir` into this study.
    ///
    /// Only structural setup errors (duplicate names or ids, module refs
    /// naming unknown modules) are returned; everything else is logged.
    pub fn load_from_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        let span = info_span!("load_study", study_dir = %dir.display());
        let _guard = span.enter();
        self.study_dir = Some(dir.to_path_buf());
        let lib = dir.join(LIB_DIR);

        if let Some(text) = read_lib_file(&lib, SERVER_CONFIG_FILE) {
            let settings = self.load_server_config(&text);
            debug!(file = SERVER_CONFIG_FILE, settings, "loaded server config");
        }

        if let Some(text) = read_lib_file(&lib, SETUP_FILE) {
            match self.load_setup(&text) {
                Ok(()) => debug!(
                    file = SETUP_FILE,
                    styles = self.styles().count(),
                    modules = self.module_list().len(),
                    plates = self.plate_list().len(),
                    "loaded study setup"
                ),
                Err(error) if error.is_recoverable() => {
                    warn!(file = SETUP_FILE, %error, "ignoring study setup");
                }
                Err(error) => return Err(error),
            }
        }

        let tables: [(&str, fn(&mut Study, &str) -> usize); 6] = [
            (VISIT_MAP_FILE, Study::load_visit_map),
            (PAGE_MAP_FILE, Study::load_page_map),
            (MISSING_MAP_FILE, Study::load_missing_map),
            (CENTERS_FILE, Study::load_centers),
            (COUNTRIES_FILE, Study::load_countries),
            (DOMAIN_MAP_FILE, Study::load_domain_map),
        ];
        for (file, load) in tables {
            if let Some(text) = read_lib_file(&lib, file) {
                let entries = load(self, &text);
                debug!(file, entries, "loaded lookup table");
            }
        }

        info!(
            study_name = self.study_name().unwrap_or_default(),
            plates = self.plate_list().len(),
            "study loaded"
        );
        Ok(())
    }
}

/// Read `lib/<name>`, or `None` when it is absent or unreadable.
///
/// Invalid UTF-8 is replaced rather than rejected; some studies carry
/// Latin-1 labels.
fn read_lib_file(lib: &Path, name: &str) -> Option<String> {
    let path = lib.join(name);
    match fs::read(&path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(source) if source.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "study file not present");
            None
        }
        Err(source) => {
            let error = StudyError::io(&path, source);
            warn!(%error, "skipping unreadable study file");
            None
        }
    }
}
