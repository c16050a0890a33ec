//! Shared fixtures for material functor integration tests.
//!
//! Besides material fixtures this provides a capturing logger, so tests can
//! count the diagnostics a functor context emits. Entries are tagged with the
//! emitting thread, which keeps parallel tests from seeing each other's logs.

#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::thread::{self, ThreadId};

use log::Log;
use parking_lot::Mutex;
use redlilium_core::material::{
    MaterialPropertiesLayout, MaterialPropertyCollection, MaterialPropertyDataType,
    MaterialPropertyFlags, MaterialPropertyIndex,
};
use redlilium_material::shader::{
    MATERIAL_PIPELINE_NAME_COMMON, MaterialPipelineShaderCollections, ShaderCollection, ShaderItem,
    ShaderOptionDescriptor, ShaderOptionGroupLayout,
};

// ============================================================================
// Log Capture
// ============================================================================

/// A single captured log entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: log::Level,
    pub message: String,
    thread: ThreadId,
}

static LOG_ENTRIES: Mutex<Vec<LogEntry>> = parking_lot::const_mutex(Vec::new());
static INSTALL: Once = Once::new();

/// Wraps `env_logger` and records every warning and error.
struct LogCapture {
    inner: env_logger::Logger,
}

impl Log for LogCapture {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Warn || self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            self.inner.log(record);
        }
        if record.level() <= log::Level::Warn {
            LOG_ENTRIES.lock().push(LogEntry {
                level: record.level(),
                message: format!("{}", record.args()),
                thread: thread::current().id(),
            });
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the capturing logger once per test binary.
pub fn install_log_capture() {
    INSTALL.call_once(|| {
        let env = env_logger::Env::default().default_filter_or("off");
        let inner = env_logger::Builder::from_env(env).is_test(true).build();
        let max_level = inner.filter().max(log::LevelFilter::Warn);
        log::set_boxed_logger(Box::new(LogCapture { inner })).expect("logger already set");
        log::set_max_level(max_level);
    });
}

/// Warnings and errors emitted by the current thread during a capture.
#[derive(Debug, Default)]
pub struct CapturedLogs {
    entries: Vec<LogEntry>,
}

impl CapturedLogs {
    pub fn warnings(&self) -> usize {
        self.count(log::Level::Warn)
    }

    pub fn errors(&self) -> usize {
        self.count(log::Level::Error)
    }

    pub fn count(&self, level: log::Level) -> usize {
        self.entries.iter().filter(|e| e.level == level).count()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(text))
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }
}

/// Run `f` and collect the warnings and errors it logs on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    install_log_capture();
    let current = thread::current().id();
    LOG_ENTRIES.lock().retain(|e| e.thread != current);

    let result = f();

    let mut entries = LOG_ENTRIES.lock();
    let (mine, others): (Vec<_>, Vec<_>) = entries.drain(..).partition(|e| e.thread == current);
    *entries = others;
    (result, CapturedLogs { entries: mine })
}

// ============================================================================
// Material Fixtures
// ============================================================================

/// Property names of [`standard_layout`], in index order.
pub const STANDARD_PROPERTIES: [(&str, MaterialPropertyDataType); 8] = [
    ("baseColor.color", MaterialPropertyDataType::Color),
    ("baseColor.textureMap", MaterialPropertyDataType::Image),
    ("metallic.factor", MaterialPropertyDataType::Float),
    ("roughness.factor", MaterialPropertyDataType::Float),
    ("general.doubleSided", MaterialPropertyDataType::Bool),
    ("clearCoat.enable", MaterialPropertyDataType::Bool),
    ("clearCoat.factor", MaterialPropertyDataType::Float),
    ("opacity.mode", MaterialPropertyDataType::UInt),
];

pub fn standard_layout() -> Arc<MaterialPropertiesLayout> {
    let layout = STANDARD_PROPERTIES
        .iter()
        .fold(MaterialPropertiesLayout::new(), |layout, (name, ty)| {
            layout.with_property(*name, *ty)
        });
    Arc::new(layout)
}

pub fn standard_properties() -> MaterialPropertyCollection {
    MaterialPropertyCollection::new(standard_layout())
}

/// Flags over the standard layout with `indices` set.
pub fn flags(indices: &[usize]) -> MaterialPropertyFlags {
    MaterialPropertyFlags::from_indices(
        STANDARD_PROPERTIES.len(),
        indices.iter().map(|&i| MaterialPropertyIndex::new(i)),
    )
}

/// Options of a shader that supports clear coat.
pub fn clear_coat_options() -> Arc<ShaderOptionGroupLayout> {
    Arc::new(
        ShaderOptionGroupLayout::new()
            .with_option(ShaderOptionDescriptor::boolean("o_clearCoat_enabled", false))
            .with_option(ShaderOptionDescriptor::enumeration(
                "o_opacity_mode",
                ["Opaque", "Cutout", "Blended"],
            )),
    )
}

/// Options of a shader with none of the material's options.
pub fn plain_options() -> Arc<ShaderOptionGroupLayout> {
    Arc::new(
        ShaderOptionGroupLayout::new()
            .with_option(ShaderOptionDescriptor::boolean("o_shadows", true)),
    )
}

/// A shader item carrying the clear coat options, optionally material-owned.
pub fn clear_coat_shader(tag: &str, owned: bool) -> ShaderItem {
    let item = ShaderItem::new(tag, clear_coat_options());
    if owned {
        item.with_owned_shader_option("o_clearCoat_enabled")
            .with_owned_shader_option("o_opacity_mode")
    } else {
        item
    }
}

/// Common pipeline of three shaders; 0 and 2 carry the clear coat options.
pub fn three_shader_pipelines(owned: bool) -> MaterialPipelineShaderCollections {
    MaterialPipelineShaderCollections::new().with_pipeline(
        MATERIAL_PIPELINE_NAME_COMMON,
        ShaderCollection::new()
            .with_item(clear_coat_shader("depth", owned))
            .with_item(ShaderItem::new("shadow", plain_options()))
            .with_item(clear_coat_shader("forward", owned)),
    )
}
