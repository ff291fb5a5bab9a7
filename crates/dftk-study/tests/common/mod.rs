use std::fs;
use std::path::Path;

pub const SETUP: &str = r#"{
  "study": {
    "name": "Heart Outcomes",
    "number": 254,
    "styles": [
      {"styleName": "YesNo", "type": "Choice",
       "codes": [{"number": 1, "label": "Yes"}, {"number": 2, "label": "No"}]}
    ],
    "modules": [
      {"id": 7, "name": "vitals", "description": "Vital signs",
       "fields": [
         {"id": 71, "name": "weight", "type": "Number", "number": 9},
         {"id": 70, "name": "Height", "type": "Number", "number": 8}
       ]},
      {"id": 3, "name": "Consent",
       "fields": [{"id": 30, "name": "signed", "type": "Choice"}]}
    ],
    "plates": [
      {"number": 2, "description": "Vital Signs",
       "moduleRefs": [
         {"id": 1, "moduleId": 7, "instance": 1,
          "fieldRefs": [
            {"id": 1001, "fieldId": 71, "number": 9, "name": "weight", "type": "Number",
             "alias": "WT$(plate)", "rects": [{"x": 100, "y": 50, "w": 30, "h": 14}]},
            {"id": 1000, "fieldId": 70, "number": 8, "name": "Height", "type": "Number"}
          ]},
         {"id": 2, "moduleId": 3,
          "fieldRefs": [
            {"id": 1002, "fieldId": 30, "number": 10, "name": "signed", "type": "Choice",
             "codes": [{"number": "1", "label": "Yes"}, {"number": "2", "label": "No"}],
             "rects": [{"x": 10, "y": 90, "w": 12, "h": 12}, {"x": 40, "y": 90, "w": 12, "h": 12}]}
          ]}
       ]},
      {"number": 1, "moduleRefs": null}
    ]
  }
}"#;

pub const VISIT_MAP: &str = "\
0|B|Screening|1|8|0|0|1 2|||||
1-52|S|Week %S|2|8|7|3|2|||||
";

pub const PAGE_MAP: &str = "2|0|Screening vitals\n";

pub const CENTERS: &str = "\
1|Monitor|PHRI|Hamilton|f|f|p|Dr Who|p|reply|ERROR MONITOR
10|Site A|Clinic|Toronto|f|f|p|Dr Ada|p|reply|1000 1999
";

pub const COUNTRIES: &str = "Canada|North America|1-20\n";

pub const DOMAIN_MAP: &str = "Vitals|2\nAdmin|1\n";

pub const MISSING_MAP: &str = ".|Not recorded\n";

pub const SERVER_CONFIG: &str = "STUDY_NAME=HOPE-3\nSTUDY_NUMBER=254\n";

/// Write a complete study directory under `dir`.
pub fn write_study(dir: &Path) {
    let lib = dir.join("lib");
    fs::create_dir_all(&lib).expect("create lib");
    for (name, text) in [
        ("DFsetup", SETUP),
        ("DFvisit_map", VISIT_MAP),
        ("DFpage_map", PAGE_MAP),
        ("DFcenters", CENTERS),
        ("DFcountries", COUNTRIES),
        ("DFdomain_map", DOMAIN_MAP),
        ("DFmissing_map", MISSING_MAP),
        ("DFserver.cf", SERVER_CONFIG),
    ] {
        fs::write(lib.join(name), text).expect("write lib file");
    }
}
