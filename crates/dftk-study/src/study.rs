//! The study aggregate: setup tree, lookup tables and server config.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use dftk_model::{
    Centers, Countries, DomainMap, Field, FieldRef, MissingMap, ModelError, Module, ModuleRef,
    PageMap, Plate, Style, VisitMap, qc_status_label, qc_type_label, reason_status_label,
};

use crate::config::{STUDY_NAME, ServerConfig};
use crate::error::{Result, StudyError};
use crate::setup::{SetupModuleRef, SetupStudy, parse_setup};

/// Everything known about one DataFax study.
///
/// A study is assembled once, either piecewise through the `add_*` and
/// `load_*` methods or from a study directory with
/// [`Study::load_from_dir`], and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Study {
    styles: BTreeMap<String, Style>,
    modules: Vec<Module>,
    modules_by_name: HashMap<String, usize>,
    modules_by_id: HashMap<i64, usize>,
    next_module_id: i64,
    plates: BTreeMap<i64, Plate>,
    visit_map: Option<VisitMap>,
    page_map: Option<PageMap>,
    missing_map: MissingMap,
    domain_map: DomainMap,
    centers: Centers,
    countries: Countries,
    config: ServerConfig,
    /// Study name from the setup file.
    pub setup_name: Option<String>,
    /// Study number from the setup file.
    pub number: Option<i64>,
    pub study_dir: Option<PathBuf>,
}

impl Study {
    pub fn new() -> Self {
        Self::default()
    }

    // Styles

    pub fn add_style(&mut self, name: &str) -> Result<&mut Style> {
        match self.styles.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ModelError::DuplicateStyle {
                name: name.to_string(),
            }
            .into()),
            Entry::Vacant(slot) => Ok(slot.insert(Style::new(name))),
        }
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.get(name)
    }

    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    // Modules

    /// Add a module; without an explicit `id` the next free sequential id
    /// is used.
    pub fn add_module(&mut self, name: &str, id: Option<i64>) -> Result<&mut Module> {
        let id = match id {
            Some(id) => id,
            None => {
                let mut id = self.next_module_id;
                while self.modules_by_id.contains_key(&id) {
                    id = id.checked_add(1).ok_or(ModelError::ModuleIdsExhausted)?;
                }
                id
            }
        };
        if self.modules_by_name.contains_key(name) {
            return Err(ModelError::DuplicateModuleName {
                name: name.to_string(),
            }
            .into());
        }
        if self.modules_by_id.contains_key(&id) {
            return Err(ModelError::DuplicateModuleId { id }.into());
        }
        self.next_module_id = self.next_module_id.max(id.saturating_add(1));
        let idx = self.modules.len();
        self.modules.push(Module::new(id, name));
        self.modules_by_name.insert(name.to_string(), idx);
        self.modules_by_id.insert(id, idx);
        Ok(&mut self.modules[idx])
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules_by_name.get(name).map(|&idx| &self.modules[idx])
    }

    pub fn module_by_id(&self, id: i64) -> Option<&Module> {
        self.modules_by_id.get(&id).map(|&idx| &self.modules[idx])
    }

    /// Modules ordered by case-insensitive name.
    pub fn module_list(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self.modules.iter().collect();
        modules.sort_by_cached_key(|module| module.name().to_lowercase());
        modules
    }

    // Plates

    pub fn add_plate(&mut self, number: i64) -> Result<&mut Plate> {
        match self.plates.entry(number) {
            Entry::Occupied(_) => Err(ModelError::DuplicatePlate { number }.into()),
            Entry::Vacant(slot) => Ok(slot.insert(Plate::new(number))),
        }
    }

    pub fn plate(&self, number: i64) -> Option<&Plate> {
        self.plates.get(&number)
    }

    /// Plates in ascending plate number order.
    pub fn plate_list(&self) -> Vec<&Plate> {
        self.plates.values().collect()
    }

    /// Every field ref in the study keyed by its unique id.
    ///
    /// Built on each call; hold on to the map when doing many lookups.
    pub fn fields_by_unique_id(&self) -> HashMap<i64, &FieldRef> {
        self.plates
            .values()
            .flat_map(Plate::field_list)
            .map(|field_ref| (field_ref.id, field_ref))
            .collect()
    }

    /// Module template field a field ref instantiates.
    pub fn field_for(&self, field_ref: &FieldRef) -> Option<&Field> {
        self.module_by_id(field_ref.module_id)?
            .field_by_id(field_ref.field_id?)
    }

    // Setup

    /// Load styles, modules and plates from `DFsetup` JSON.
    ///
    /// Malformed JSON is reported as [`StudyError::SetupJson`] and leaves
    /// the study untouched. Duplicates and module refs naming an unknown
    /// module abort the load part way through.
    pub fn load_setup(&mut self, json: &str) -> Result<()> {
        let document = parse_setup(json).map_err(|source| StudyError::SetupJson { source })?;
        let study = document.study.unwrap_or_default();
        self.apply_setup(study)
    }

    fn apply_setup(&mut self, study: SetupStudy) -> Result<()> {
        self.setup_name = study.name;
        self.number = study.number;

        for setup in study.styles {
            let style = self.add_style(&setup.style_name)?;
            style.attrs = setup.field.into_attributes();
            style.attrs.style_name = Some(setup.style_name);
        }

        for setup in study.modules {
            let module = self.add_module(&setup.name, Some(setup.id))?;
            module.description = setup.description;
            for field in setup.fields {
                module.add_field(field.id, field.field.into_attributes());
            }
            module.sort_fields();
        }

        for setup in study.plates {
            if self.plates.contains_key(&setup.number) {
                return Err(ModelError::DuplicatePlate {
                    number: setup.number,
                }
                .into());
            }
            let mut plate = Plate::new(setup.number);
            plate.description = setup.description;
            for module_ref in setup.module_refs {
                self.add_setup_module_ref(&mut plate, module_ref)?;
            }
            self.plates.insert(plate.number(), plate);
        }
        Ok(())
    }

    fn add_setup_module_ref(&self, plate: &mut Plate, setup: SetupModuleRef) -> Result<()> {
        let module = self
            .module_by_id(setup.module_id)
            .ok_or(StudyError::UnknownModule {
                plate: plate.number(),
                module_ref: setup.id,
                module_id: setup.module_id,
            })?;
        let module_ref = plate.add_module_ref(ModuleRef::new(setup.id, module.id()));
        module_ref.name = setup.name;
        module_ref.description = setup.description;
        module_ref.instance = setup.instance.unwrap_or(0);
        for field_ref in setup.field_refs {
            let mut built = FieldRef::new(field_ref.id, field_ref.field.into_attributes());
            built.field_id = module
                .field_by_id(field_ref.field_id)
                .map(|field| field.id);
            plate.add_field_ref(setup.id, built)?;
        }
        Ok(())
    }

    // Visit and page maps

    pub fn load_visit_map(&mut self, text: &str) -> usize {
        self.visit_map.get_or_insert_with(VisitMap::default).load(text)
    }

    pub fn visit_map(&self) -> Option<&VisitMap> {
        self.visit_map.as_ref()
    }

    /// Label for `visit`; `Visit <n>` when no visit map is loaded or no
    /// entry covers it.
    pub fn visit_label(&self, visit: i64) -> String {
        match &self.visit_map {
            Some(map) => map.label(visit),
            None => format!("Visit {visit}"),
        }
    }

    pub fn load_page_map(&mut self, text: &str) -> usize {
        self.page_map.get_or_insert_with(PageMap::default).load(text)
    }

    pub fn page_map(&self) -> Option<&PageMap> {
        self.page_map.as_ref()
    }

    /// Label for `plate` at `visit`.
    ///
    /// The page map wins, then the plate description, then `Plate <n>`.
    pub fn page_label(&self, visit: i64, plate: i64) -> String {
        if let Some(label) = self.page_map.as_ref().and_then(|map| map.label(visit, plate)) {
            return label;
        }
        self.plate(plate)
            .and_then(|p| p.description.clone())
            .unwrap_or_else(|| format!("Plate {plate}"))
    }

    // Other lookup tables

    pub fn load_missing_map(&mut self, text: &str) -> usize {
        self.missing_map.load(text)
    }

    pub fn missing_map(&self) -> &MissingMap {
        &self.missing_map
    }

    pub fn missing_value_label(&self, code: &str) -> Option<&str> {
        self.missing_map.label(code)
    }

    pub fn load_centers(&mut self, text: &str) -> usize {
        self.centers.load(text)
    }

    pub fn centers(&self) -> &Centers {
        &self.centers
    }

    pub fn load_countries(&mut self, text: &str) -> usize {
        self.countries.load(text)
    }

    pub fn countries(&self) -> &Countries {
        &self.countries
    }

    pub fn load_domain_map(&mut self, text: &str) -> usize {
        self.domain_map.load(text)
    }

    pub fn domain_map(&self) -> &DomainMap {
        &self.domain_map
    }

    // QC and reason codes

    pub fn qc_type(&self, code: i64) -> &'static str {
        qc_type_label(code)
    }

    pub fn qc_status(&self, code: i64, simplify: bool) -> &'static str {
        qc_status_label(code, simplify)
    }

    pub fn reason_status(&self, code: i64) -> Option<&'static str> {
        reason_status_label(code)
    }

    // Server config

    /// Replace the server config with the settings in `text`.
    pub fn load_server_config(&mut self, text: &str) -> usize {
        self.config = ServerConfig::parse(text);
        self.config.len()
    }

    pub fn config(&self, key: &str) -> Option<&str> {
        self.config.get(key)
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.config
    }

    /// `STUDY_NAME` from the server config, else the setup name.
    pub fn study_name(&self) -> Option<&str> {
        self.config
            .get(STUDY_NAME)
            .or(self.setup_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_rejected() {
        let mut study = Study::new();
        study.add_style("Date").expect("style");
        assert!(matches!(
            study.add_style("Date"),
            Err(StudyError::Model(ModelError::DuplicateStyle { .. }))
        ));

        study.add_module("Vitals", Some(3)).expect("module");
        assert!(matches!(
            study.add_module("Vitals", None),
            Err(StudyError::Model(ModelError::DuplicateModuleName { .. }))
        ));
        assert!(matches!(
            study.add_module("Other", Some(3)),
            Err(StudyError::Model(ModelError::DuplicateModuleId { id: 3 }))
        ));

        study.add_plate(1).expect("plate");
        assert!(matches!(
            study.add_plate(1),
            Err(StudyError::Model(ModelError::DuplicatePlate { number: 1 }))
        ));
    }

    #[test]
    fn generated_module_ids_skip_taken_ones() {
        let mut study = Study::new();
        assert_eq!(study.add_module("a", None).expect("a").id(), 0);
        assert_eq!(study.add_module("b", Some(1)).expect("b").id(), 1);
        assert_eq!(study.add_module("c", None).expect("c").id(), 2);
        assert_eq!(study.add_module("d", Some(10)).expect("d").id(), 10);
        assert_eq!(study.add_module("e", None).expect("e").id(), 11);
    }

    #[test]
    fn largest_module_id_does_not_overflow() {
        let mut study = Study::new();
        study
            .load_setup(r#"{"study": {"modules": [{"id": 9223372036854775807, "name": "last"}]}}"#)
            .expect("load setup");
        assert_eq!(study.module("last").map(Module::id), Some(i64::MAX));
        assert!(matches!(
            study.add_module("next", None),
            Err(StudyError::Model(ModelError::ModuleIdsExhausted))
        ));
        assert!(study.module("next").is_none());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn built_study_is_shareable_across_threads() {
        assert_send_sync::<Study>();

        let mut study = Study::new();
        study
            .add_plate(1)
            .expect("plate")
            .add_module_ref(ModuleRef::new(1, 1));
        let study = std::sync::Arc::new(study);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let study = std::sync::Arc::clone(&study);
                std::thread::spawn(move || study.plate(1).map(|plate| plate.field_list().len()))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("reader thread"), Some(0));
        }
    }

    #[test]
    fn module_list_ignores_case() {
        let mut study = Study::new();
        for name in ["beta", "Alpha", "gamma"] {
            study.add_module(name, None).expect("module");
        }
        let names: Vec<&str> = study.module_list().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn labels_without_maps() {
        let mut study = Study::new();
        assert_eq!(study.visit_label(4), "Visit 4");
        assert_eq!(study.page_label(4, 9), "Plate 9");
        study.add_plate(9).expect("plate").description = Some("Vital Signs".to_string());
        assert_eq!(study.page_label(4, 9), "Vital Signs");
        study.load_page_map("9|4|Vitals at %S\n");
        assert_eq!(study.page_label(4, 9), "Vitals at 4");
        assert_eq!(study.missing_value_label("*"), Some("Missing Value"));
    }

    #[test]
    fn study_name_prefers_server_config() {
        let mut study = Study::new();
        assert_eq!(study.study_name(), None);
        study.setup_name = Some("setup".to_string());
        assert_eq!(study.study_name(), Some("setup"));
        study.load_server_config("STUDY_NAME=server\n");
        assert_eq!(study.study_name(), Some("server"));
    }

    #[test]
    fn qc_wrappers() {
        let study = Study::new();
        assert_eq!(study.qc_type(22), "overdue visit");
        assert_eq!(study.qc_status(3, false), "resolved(NA)");
        assert_eq!(study.qc_status(3, true), "resolved");
        assert_eq!(study.reason_status(2), Some("rejected"));
    }
}
