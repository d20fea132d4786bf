//! Lowering a project description into the `project.pbxproj` object graph.
//!
//! Objects reference each other only through ids derived from their name
//! and `isa` type, so any object can name another before it is written.
//! Sections are written in a fixed order and source order drives every list.

use crate::emitter::Emitter;
use crate::registry::ObjectRegistry;
use crate::Result;
use kiln_build::ProjectDescription;
use kiln_common::{Language, ObjectId};

const PRODUCTS_GROUP: &str = "Products";
const SOURCES_GROUP: &str = "Sources";
/// Key of the root group. Fixed, so no project or group name can clash with it.
const MAIN_GROUP: &str = "mainGroup";
const SOURCES_PHASE: &str = "Sources";
const CONFIGURATIONS: [&str; 2] = ["Debug", "Release"];
const DEFAULT_CONFIGURATION: &str = "Release";

const GROUP_SOURCE_TREE: &str = "<group>";
const PRODUCT_FILE_TYPE: &str = "compiled.mach-o.executable";
const PRODUCT_TYPE_TOOL: &str = "com.apple.product-type.tool";
/// `buildActionMask` value Xcode writes for "all actions".
const BUILD_ACTION_MASK: &str = "2147483647";

mod isa {
    pub const FILE_REFERENCE: &str = "PBXFileReference";
    pub const BUILD_FILE: &str = "PBXBuildFile";
    pub const GROUP: &str = "PBXGroup";
    pub const SOURCES_BUILD_PHASE: &str = "PBXSourcesBuildPhase";
    pub const BUILD_CONFIGURATION: &str = "XCBuildConfiguration";
    pub const CONFIGURATION_LIST: &str = "XCConfigurationList";
    pub const NATIVE_TARGET: &str = "PBXNativeTarget";
    pub const PROJECT: &str = "PBXProject";
}

/// Settings for the generated project that are not part of the build description.
#[derive(Debug, Clone)]
pub struct XcodeConfig {
    /// `ORGANIZATIONNAME` attribute.
    pub organization_name: String,
    /// `LastUpgradeCheck` attribute.
    pub last_upgrade_check: String,
    /// `CreatedOnToolsVersion` of the target.
    pub tools_version: String,
}

impl Default for XcodeConfig {
    fn default() -> Self {
        Self {
            organization_name: String::new(),
            last_upgrade_check: "1000".to_string(),
            tools_version: "10.0".to_string(),
        }
    }
}

impl XcodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the organization name.
    pub fn organization_name(mut self, name: impl Into<String>) -> Self {
        self.organization_name = name.into();
        self
    }

    /// Set the `LastUpgradeCheck` marker.
    pub fn last_upgrade_check(mut self, marker: impl Into<String>) -> Self {
        self.last_upgrade_check = marker.into();
        self
    }

    /// Set the tools version recorded for the target.
    pub fn tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = version.into();
        self
    }
}

/// A generated project file and the objects it contains.
#[derive(Debug)]
pub struct ProjectFile {
    pub text: String,
    pub objects: ObjectRegistry,
    pub root: ObjectId,
}

/// Writes one project description as a complete project file.
pub struct ProjectWriter<'a> {
    project: &'a ProjectDescription,
    config: &'a XcodeConfig,
    emitter: Emitter,
    objects: ObjectRegistry,
}

impl<'a> ProjectWriter<'a> {
    pub fn new(project: &'a ProjectDescription, config: &'a XcodeConfig) -> Self {
        Self {
            project,
            config,
            emitter: Emitter::new(),
            objects: ObjectRegistry::new(),
        }
    }

    /// Validate the project and emit the whole document.
    ///
    /// Nothing is returned unless every object was written.
    pub fn write(mut self) -> Result<ProjectFile> {
        self.project.validate()?;
        log::debug!(
            "generating Xcode project for '{}' ({} sources)",
            self.project.name(),
            self.project.sources().len()
        );

        self.emitter.begin_document();
        self.emitter.property("archiveVersion", "1");
        self.emitter.start_map("classes");
        self.emitter.end_map();
        self.emitter.property("objectVersion", "46");
        self.emitter.start_map("objects");

        self.file_references()?;
        self.build_files()?;
        self.groups()?;
        self.sources_build_phase()?;
        self.build_configurations()?;
        self.configuration_lists()?;
        self.native_target()?;
        let root = self.project_object()?;

        self.emitter.end_map();
        self.emitter
            .property_hash("rootObject", root, "Project object");

        Ok(ProjectFile {
            text: self.emitter.finish(),
            objects: self.objects,
            root,
        })
    }

    fn name(&self) -> &'a str {
        self.project.name()
    }

    fn sources(&self) -> &'a [String] {
        self.project.sources()
    }

    /// Register an object, open it and write its `isa`.
    fn begin_object(&mut self, name: &str, isa: &str, comment: &str) -> Result<ObjectId> {
        let id = self.objects.register(name, isa)?;
        self.emitter.object_start(id, comment);
        self.emitter.property("isa", isa);
        Ok(id)
    }

    fn section<T>(&mut self, isa: &str, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        log::debug!("writing {} section", isa);
        self.emitter.section_start(isa);
        let value = body(self)?;
        self.emitter.section_end(isa);
        Ok(value)
    }

    fn file_references(&mut self) -> Result<()> {
        self.section(isa::FILE_REFERENCE, |w| {
            for source in w.sources() {
                w.begin_object(source, isa::FILE_REFERENCE, source)?;
                w.emitter.property(
                    "lastKnownFileType",
                    Language::from_path(source).xcode_file_type(),
                );
                w.emitter.property("path", source);
                w.emitter.property("sourceTree", GROUP_SOURCE_TREE);
                w.emitter.object_end();
            }

            let name = w.name();
            w.begin_object(name, isa::FILE_REFERENCE, name)?;
            w.emitter.property("explicitFileType", PRODUCT_FILE_TYPE);
            w.emitter.property("includeInIndex", "0");
            w.emitter.property("path", name);
            w.emitter.property("sourceTree", "BUILT_PRODUCTS_DIR");
            w.emitter.object_end();
            Ok(())
        })
    }

    fn build_files(&mut self) -> Result<()> {
        self.section(isa::BUILD_FILE, |w| {
            for source in w.sources() {
                let comment = build_file_comment(source);
                w.begin_object(source, isa::BUILD_FILE, &comment)?;
                w.emitter.property_hash(
                    "fileRef",
                    ObjectId::for_object(source, isa::FILE_REFERENCE),
                    source,
                );
                w.emitter.object_end();
            }
            Ok(())
        })
    }

    fn groups(&mut self) -> Result<()> {
        self.section(isa::GROUP, |w| {
            let name = w.name();

            w.begin_object(PRODUCTS_GROUP, isa::GROUP, PRODUCTS_GROUP)?;
            w.emitter.start_list("children");
            w.emitter
                .list_item_hash(ObjectId::for_object(name, isa::FILE_REFERENCE), name);
            w.emitter.end_list();
            w.emitter.property("name", PRODUCTS_GROUP);
            w.emitter.property("sourceTree", GROUP_SOURCE_TREE);
            w.emitter.object_end();

            w.begin_object(SOURCES_GROUP, isa::GROUP, SOURCES_GROUP)?;
            w.emitter.start_list("children");
            for source in w.sources() {
                w.emitter
                    .list_item_hash(ObjectId::for_object(source, isa::FILE_REFERENCE), source);
            }
            w.emitter.end_list();
            w.emitter.property("name", SOURCES_GROUP);
            w.emitter.property("sourceTree", GROUP_SOURCE_TREE);
            w.emitter.object_end();

            // Main group: no display name, so no comment either.
            w.begin_object(MAIN_GROUP, isa::GROUP, "")?;
            w.emitter.start_list("children");
            w.emitter.list_item_hash(
                ObjectId::for_object(SOURCES_GROUP, isa::GROUP),
                SOURCES_GROUP,
            );
            w.emitter.list_item_hash(
                ObjectId::for_object(PRODUCTS_GROUP, isa::GROUP),
                PRODUCTS_GROUP,
            );
            w.emitter.end_list();
            w.emitter.property("sourceTree", GROUP_SOURCE_TREE);
            w.emitter.object_end();
            Ok(())
        })
    }

    fn sources_build_phase(&mut self) -> Result<()> {
        self.section(isa::SOURCES_BUILD_PHASE, |w| {
            w.begin_object(SOURCES_PHASE, isa::SOURCES_BUILD_PHASE, SOURCES_PHASE)?;
            w.emitter.property("buildActionMask", BUILD_ACTION_MASK);
            w.emitter.start_list("files");
            for source in w.sources() {
                w.emitter.list_item_hash(
                    ObjectId::for_object(source, isa::BUILD_FILE),
                    &build_file_comment(source),
                );
            }
            w.emitter.end_list();
            w.emitter
                .property("runOnlyForDeploymentPostprocessing", "0");
            w.emitter.object_end();
            Ok(())
        })
    }

    fn build_configurations(&mut self) -> Result<()> {
        self.section(isa::BUILD_CONFIGURATION, |w| {
            for configuration in CONFIGURATIONS {
                w.begin_object(configuration, isa::BUILD_CONFIGURATION, configuration)?;
                w.emitter.start_map("buildSettings");
                w.emitter.map_item("CODE_SIGN_STYLE", "Automatic");
                w.emitter.map_item("PRODUCT_NAME", "$(TARGET_NAME)");
                w.emitter.map_item("SYMROOT", "build");
                w.emitter.end_map();
                w.emitter.property("name", configuration);
                w.emitter.object_end();
            }
            Ok(())
        })
    }

    fn configuration_lists(&mut self) -> Result<()> {
        self.section(isa::CONFIGURATION_LIST, |w| {
            let name = w.name();
            for owner in [isa::NATIVE_TARGET, isa::PROJECT] {
                let list = configuration_list_name(owner, name);
                w.begin_object(&list, isa::CONFIGURATION_LIST, &list)?;
                w.emitter.start_list("buildConfigurations");
                for configuration in CONFIGURATIONS {
                    w.emitter.list_item_hash(
                        ObjectId::for_object(configuration, isa::BUILD_CONFIGURATION),
                        configuration,
                    );
                }
                w.emitter.end_list();
                w.emitter.property("defaultConfigurationIsVisible", "0");
                w.emitter
                    .property("defaultConfigurationName", DEFAULT_CONFIGURATION);
                w.emitter.object_end();
            }
            Ok(())
        })
    }

    fn native_target(&mut self) -> Result<()> {
        self.section(isa::NATIVE_TARGET, |w| {
            let name = w.name();
            let list = configuration_list_name(isa::NATIVE_TARGET, name);

            w.begin_object(name, isa::NATIVE_TARGET, name)?;
            w.emitter.property_hash(
                "buildConfigurationList",
                ObjectId::for_object(&list, isa::CONFIGURATION_LIST),
                &list,
            );
            w.emitter.start_list("buildPhases");
            w.emitter.list_item_hash(
                ObjectId::for_object(SOURCES_PHASE, isa::SOURCES_BUILD_PHASE),
                SOURCES_PHASE,
            );
            w.emitter.end_list();
            w.emitter.start_list("buildRules");
            w.emitter.end_list();
            w.emitter.start_list("dependencies");
            w.emitter.end_list();
            w.emitter.property("name", name);
            w.emitter.property("productName", name);
            w.emitter.property_hash(
                "productReference",
                ObjectId::for_object(name, isa::FILE_REFERENCE),
                name,
            );
            w.emitter.property("productType", PRODUCT_TYPE_TOOL);
            w.emitter.object_end();
            Ok(())
        })
    }

    fn project_object(&mut self) -> Result<ObjectId> {
        self.section(isa::PROJECT, |w| {
            let name = w.name();
            let config = w.config;
            let target = ObjectId::for_object(name, isa::NATIVE_TARGET);
            let list = configuration_list_name(isa::PROJECT, name);

            let root = w.begin_object(name, isa::PROJECT, "Project object")?;

            w.emitter.start_map("attributes");
            w.emitter
                .map_item("LastUpgradeCheck", &config.last_upgrade_check);
            w.emitter
                .map_item("ORGANIZATIONNAME", &config.organization_name);
            w.emitter.start_map("TargetAttributes");
            w.emitter.start_map_hash(target);
            w.emitter
                .map_item("CreatedOnToolsVersion", &config.tools_version);
            w.emitter.end_map();
            w.emitter.end_map();
            w.emitter.end_map();

            w.emitter.property_hash(
                "buildConfigurationList",
                ObjectId::for_object(&list, isa::CONFIGURATION_LIST),
                &list,
            );
            w.emitter.property("compatibilityVersion", "Xcode 3.2");
            w.emitter.property("developmentRegion", "en");
            w.emitter.property("hasScannedForEncodings", "0");
            w.emitter.start_list("knownRegions");
            w.emitter.list_item("en");
            w.emitter.end_list();
            w.emitter
                .property_hash("mainGroup", ObjectId::for_object(MAIN_GROUP, isa::GROUP), "");
            w.emitter.property_hash(
                "productRefGroup",
                ObjectId::for_object(PRODUCTS_GROUP, isa::GROUP),
                PRODUCTS_GROUP,
            );
            w.emitter.property("projectDirPath", "");
            w.emitter.property("projectRoot", "");
            w.emitter.start_list("targets");
            w.emitter.list_item_hash(target, name);
            w.emitter.end_list();
            w.emitter.object_end();
            Ok(root)
        })
    }
}

fn build_file_comment(source: &str) -> String {
    format!("{} in {}", source, SOURCES_PHASE)
}

/// Display name of the configuration list owned by a target or project.
fn configuration_list_name(owner_isa: &str, name: &str) -> String {
    format!("Build configuration list for {} \"{}\"", owner_isa, name)
}
