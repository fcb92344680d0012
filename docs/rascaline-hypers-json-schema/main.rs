use std::path::PathBuf;

use schemars::schema::{RootSchema, SchemaObject};
use schemars::visit::{Visitor, visit_root_schema, visit_schema_object};

use rascaline_hypers::native::{SoapHypers, LodeHypers};

macro_rules! generate_schema {
    ($Type: ty) => {
        generate_schema!(stringify!($Type), $Type)
    };
    ($name: expr, $Type: ty) => {
        save_schema($name, schemars::schema_for!($Type))
    };
}

static REFS_TO_RENAME: &[RenameRefInSchema] = &[
    RenameRefInSchema {
        in_code: "SphericalExpansionBasis_for_SoapRadialBasis",
        in_docs: "SphericalExpansionBasis",
    },
    RenameRefInSchema {
        in_code: "SphericalExpansionBasis_for_LodeRadialBasis",
        in_docs: "SphericalExpansionBasis",
    },
    RenameRefInSchema {
        in_code: "TensorProductBasis_for_SoapRadialBasis",
        in_docs: "TensorProductBasis",
    },
    RenameRefInSchema {
        in_code: "TensorProductBasis_for_LodeRadialBasis",
        in_docs: "TensorProductBasis",
    },
    RenameRefInSchema {
        in_code: "ExplicitBasis_for_SoapRadialBasis",
        in_docs: "ExplicitBasis",
    },
    RenameRefInSchema {
        in_code: "ExplicitBasis_for_LodeRadialBasis",
        in_docs: "ExplicitBasis",
    },
    RenameRefInSchema {
        in_code: "SoapRadialBasis",
        in_docs: "RadialBasis",
    },
    RenameRefInSchema {
        in_code: "LodeRadialBasis",
        in_docs: "RadialBasis",
    },
];

#[derive(Clone)]
struct RenameRefInSchema {
    in_code: &'static str,
    in_docs: &'static str,
}

impl Visitor for RenameRefInSchema {
    fn visit_schema_object(&mut self, schema: &mut SchemaObject) {
        let in_code_reference = format!("#/definitions/{}", self.in_code);
        if schema.reference.as_deref() == Some(in_code_reference.as_str()) {
            schema.reference = Some(format!("#/definitions/{}", self.in_docs));
        }
        visit_schema_object(self, schema);
    }
}

fn save_schema(name: &str, mut schema: RootSchema) {
    // rename some of the autogenerate names.
    // Step 1: rename the definitions
    for transform in REFS_TO_RENAME {
        if let Some(value) = schema.definitions.remove(transform.in_code) {
            assert!(!schema.definitions.contains_key(transform.in_docs));
            schema.definitions.insert(transform.in_docs.into(), value);
        }
    }

    // Step 2: rename the references to these definitions
    for transform in REFS_TO_RENAME {
        visit_root_schema(&mut transform.clone(), &mut schema);
    }

    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop();
    path.push("build");
    path.push("json-schemas");
    std::fs::create_dir_all(&path).expect("failed to create JSON schema directory");

    path.push(format!("{}.json", name));

    let schema = serde_json::to_string_pretty(&schema).expect("failed to create JSON schema");
    std::fs::write(path, schema).expect("failed to save JSON schema to file");
}

fn main() {
    generate_schema!("SphericalExpansionByPair", SoapHypers);
    generate_schema!("SphericalExpansion", SoapHypers);
    generate_schema!("SoapPowerSpectrum", SoapHypers);
    generate_schema!("SoapRadialSpectrum", SoapHypers);
    generate_schema!("LodeSphericalExpansion", LodeHypers);
}
