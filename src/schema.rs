//! Class schemas: the validated input to [`assemble`](crate::assemble::assemble).
//!
//! Every invariant is checked in [`ClassSchema::new`]; a value of this type is
//! always assemblable.
use std::collections::HashSet;

use serde::Deserialize;

use crate::error::{SchemaError, SchemaFileError};
use crate::naming;
use crate::types::{TypeCategory, TypeRef};

pub const DEFAULT_SEPARATOR: &str = ",";
pub const DEFAULT_HASH_PRIME: i32 = 59;

// ------------------------------- Fields ----------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), ty }
    }

    pub fn category(&self) -> TypeCategory {
        self.ty.category()
    }
}

// ------------------------------- Options ---------------------------------- //

/// Every generation switch with its default. Built once, then handed to
/// [`ClassSchema::new`], which validates `field_separator` and `hash_prime`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationOptions {
    pub emit_no_args_constructor: bool,
    pub emit_full_args_constructor: bool,
    pub emit_equals_and_hash_code: bool,
    pub emit_to_string: bool,
    pub call_super: bool,
    pub include_field_names_in_to_string: bool,
    pub field_separator: String,
    pub hash_prime: i32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            emit_no_args_constructor: false,
            emit_full_args_constructor: false,
            emit_equals_and_hash_code: false,
            emit_to_string: false,
            call_super: false,
            include_field_names_in_to_string: true,
            field_separator: DEFAULT_SEPARATOR.to_string(),
            hash_prime: DEFAULT_HASH_PRIME,
        }
    }
}

impl GenerationOptions {
    /// Everything on, with the default separator and prime.
    pub fn all() -> Self {
        Self {
            emit_no_args_constructor: true,
            emit_full_args_constructor: true,
            emit_equals_and_hash_code: true,
            emit_to_string: true,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.hash_prime <= 0 {
            return Err(SchemaError::NonPositivePrime(self.hash_prime));
        }
        if self.field_separator.is_empty() {
            return Err(SchemaError::EmptySeparator);
        }
        Ok(())
    }
}

// -------------------------------- Schema ---------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchema {
    name: String,
    namespace: Option<String>,
    fields: Vec<FieldDescriptor>,
    options: GenerationOptions,
}

impl ClassSchema {
    /// Normalize names and check every invariant.
    ///
    /// The class name is capitalized and field names decapitalized (camel
    /// case, `snake_case` folded); duplicates are detected after that.
    pub fn new(
        name: &str,
        namespace: Option<&str>,
        fields: Vec<FieldDescriptor>,
        options: GenerationOptions,
    ) -> Result<Self, SchemaError> {
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyClassName);
        }
        let name = naming::capitalize_camel_case(name.trim());
        if !naming::is_identifier(&name) {
            return Err(SchemaError::InvalidIdentifier(name));
        }

        let namespace = match namespace {
            None => None,
            Some(ns) if ns.trim().is_empty() => return Err(SchemaError::EmptyNamespace),
            Some(ns) => {
                let ns = naming::package_name(ns.trim());
                if !ns.split('.').all(naming::is_identifier) {
                    return Err(SchemaError::InvalidIdentifier(ns));
                }
                Some(ns)
            }
        };

        if fields.is_empty() {
            return Err(SchemaError::EmptyFieldList);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        let mut normalized = Vec::with_capacity(fields.len());
        for (index, field) in fields.into_iter().enumerate() {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName { index });
            }
            let field_name = naming::decapitalize_camel_case(field.name.trim());
            if !naming::is_identifier(&field_name) {
                return Err(SchemaError::InvalidIdentifier(field.name));
            }
            if !seen.insert(field_name.clone()) {
                return Err(SchemaError::DuplicateField(field_name));
            }
            normalized.push(FieldDescriptor { name: field_name, ty: field.ty });
        }

        options.validate()?;

        Ok(Self { name, namespace, fields: normalized, options })
    }

    /// Build from parallel name/type lists, as a command line supplies them.
    pub fn from_parts<S: AsRef<str>>(
        name: &str,
        namespace: Option<&str>,
        field_names: &[S],
        field_types: Vec<TypeRef>,
        options: GenerationOptions,
    ) -> Result<Self, SchemaError> {
        if field_names.len() != field_types.len() {
            return Err(SchemaError::FieldCountMismatch {
                names: field_names.len(),
                types: field_types.len(),
            });
        }
        let fields = field_names
            .iter()
            .zip(field_types)
            .map(|(n, ty)| FieldDescriptor::new(n.as_ref(), ty))
            .collect();
        Self::new(name, namespace, fields, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }
}

// ----------------------------- Schema files ------------------------------- //

/// On-disk JSON form of a class schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    pub fields: Vec<SchemaFileField>,
    #[serde(default)]
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFileField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaFile {
    pub fn from_json(src: &str) -> Result<Self, SchemaFileError> {
        crate::path_de::from_str_with_path(src)
    }

    /// Resolve type names, then validate.
    pub fn into_schema(self) -> Result<ClassSchema, SchemaFileError> {
        let fields = self
            .fields
            .into_iter()
            .map(|f| Ok(FieldDescriptor::new(f.name, TypeRef::parse(&f.ty)?)))
            .collect::<Result<Vec<_>, SchemaFileError>>()?;
        Ok(ClassSchema::new(&self.name, self.namespace.as_deref(), fields, self.options)?)
    }
}

// ------------------------------- Tests ------------------------------------ //
