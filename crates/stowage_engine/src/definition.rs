//! Process definitions and the catalog they are looked up in.
//!
//! A [`ProcessDefinition`] is immutable once built and shared by `Arc`
//! between every aggregator that runs it.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;

// =============================================================================
// Process Definition
// =============================================================================

/// A resource consumed by a process, per unit of capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessInput {
    /// Resource name.
    pub resource: String,
    /// Consumption per second at capacity 1.
    pub rate: f64,
}

/// A resource produced by a process, per unit of capacity.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessOutput {
    /// Resource name.
    pub resource: String,
    /// Production per second at capacity 1.
    pub rate: f64,
    /// Whether the output is vented overboard unless the player opts out.
    pub dump_by_default: bool,
}

/// Immutable description of a resource process (a converter, a scrubber...).
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessDefinition {
    name: String,
    title: String,
    can_toggle: bool,
    inputs: Vec<ProcessInput>,
    outputs: Vec<ProcessOutput>,
    /// Name of the virtual resource that carries this process's capacity.
    pseudo_resource: String,
}

impl ProcessDefinition {
    /// Creates a definition with no inputs or outputs.
    ///
    /// The title defaults to the name and the process can be toggled.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            can_toggle: true,
            inputs: Vec::new(),
            outputs: Vec::new(),
            pseudo_resource: format!("_{name}"),
            name,
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets whether the player may switch the process on and off.
    #[must_use]
    pub fn with_toggle(mut self, can_toggle: bool) -> Self {
        self.can_toggle = can_toggle;
        self
    }

    /// Adds an input.
    #[must_use]
    pub fn with_input(mut self, resource: impl Into<String>, rate: f64) -> Self {
        self.inputs.push(ProcessInput {
            resource: resource.into(),
            rate,
        });
        self
    }

    /// Adds an output.
    #[must_use]
    pub fn with_output(
        mut self,
        resource: impl Into<String>,
        rate: f64,
        dump_by_default: bool,
    ) -> Self {
        self.outputs.push(ProcessOutput {
            resource: resource.into(),
            rate,
            dump_by_default,
        });
        self
    }

    /// Returns the unique process name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns true if the process can be toggled.
    #[must_use]
    pub fn can_toggle(&self) -> bool {
        self.can_toggle
    }

    /// Returns the inputs in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[ProcessInput] {
        &self.inputs
    }

    /// Returns the outputs in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[ProcessOutput] {
        &self.outputs
    }

    /// Returns true if the process declares an output named `resource`.
    #[must_use]
    pub fn has_output(&self, resource: &str) -> bool {
        self.outputs.iter().any(|o| o.resource == resource)
    }

    /// Returns the name of the virtual resource holding this process's capacity.
    #[must_use]
    pub fn pseudo_resource_name(&self) -> &str {
        &self.pseudo_resource
    }

    /// Returns the outputs dumped by default, in declaration order.
    #[must_use]
    pub fn default_dumped_outputs(&self) -> Vec<String> {
        self.outputs
            .iter()
            .filter(|o| o.dump_by_default)
            .map(|o| o.resource.clone())
            .collect()
    }

    /// Formats the resource rates of this process running at `capacity`.
    ///
    /// One line per input (negative) then per output (positive).
    #[must_use]
    pub fn describe(&self, capacity: f64, include_title: bool) -> String {
        let mut text = String::new();
        if include_title {
            let _ = writeln!(text, "{}", self.title);
        }
        for input in &self.inputs {
            let _ = writeln!(
                text,
                "{}: {}",
                input.resource,
                format_rate(-input.rate * capacity)
            );
        }
        for output in &self.outputs {
            let _ = writeln!(
                text,
                "{}: {}",
                output.resource,
                format_rate(output.rate * capacity)
            );
        }
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }
}

/// Formats a signed per-second rate, switching to per-hour for tiny rates.
#[must_use]
pub fn format_rate(per_second: f64) -> String {
    let magnitude = per_second.abs();
    if magnitude == 0.0 {
        "0/s".to_owned()
    } else if magnitude < 0.01 {
        format!("{:+.2}/h", per_second * 3600.0)
    } else {
        format!("{per_second:+.2}/s")
    }
}

// =============================================================================
// Process Catalog
// =============================================================================

/// Name-indexed set of process definitions.
#[derive(Clone, Debug, Default)]
pub struct ProcessCatalog {
    definitions: BTreeMap<String, Arc<ProcessDefinition>>,
}

impl ProcessCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, replacing any definition of the same name.
    ///
    /// Returns the shared handle to the stored definition.
    pub fn insert(&mut self, definition: ProcessDefinition) -> Arc<ProcessDefinition> {
        let definition = Arc::new(definition);
        self.definitions
            .insert(definition.name().to_owned(), Arc::clone(&definition));
        definition
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, definition: ProcessDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Looks a definition up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<ProcessDefinition>> {
        self.definitions.get(name).cloned()
    }

    /// Returns true if a definition named `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Iterates over definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProcessDefinition>> {
        self.definitions.values()
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<ProcessDefinition> for ProcessCatalog {
    fn from_iter<I: IntoIterator<Item = ProcessDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.insert(definition);
        }
        catalog
    }
}
