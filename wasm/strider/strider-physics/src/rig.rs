//! Bone hierarchy read from a URDF file.
//!
//! Links become bones and every joint's origin becomes the child bone's
//! offset from its parent. Joint types and axes are ignored: the rig is only
//! used to find where legs attach to the body, so it stays in its rest pose.
//! Files are expected in the walker's frame (Y up, forward -Z).

use std::collections::{HashMap, VecDeque};

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use roxmltree::{Document, Node};
use strider_gait::{BoneId, Skeleton};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RigError {
    #[error("malformed URDF: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("URDF has no links")]
    Empty,
    #[error("joint '{joint}' refers to unknown link '{link}'")]
    UnknownLink { joint: String, link: String },
    #[error("link '{0}' has more than one parent joint")]
    MultipleParents(String),
    #[error("URDF has no root link")]
    NoRoot,
}

#[derive(Clone, Debug)]
pub struct Bone {
    pub name: String,
    pub parent: Option<BoneId>,
    /// Offset from the parent bone.
    pub local: Isometry3<f32>,
    /// Rest pose in the rig's model space.
    pub model: Isometry3<f32>,
}

#[derive(Clone, Debug)]
pub struct Rig {
    bones: Vec<Bone>,
    root: BoneId,
}

impl Rig {
    pub fn from_urdf(urdf: &str) -> Result<Self, RigError> {
        let doc = Document::parse(urdf)?;

        let mut bones = Vec::new();
        let mut ids: HashMap<&str, BoneId> = HashMap::new();
        for node in doc.descendants().filter(|n| n.has_tag_name("link")) {
            if let Some(name) = node.attribute("name") {
                ids.insert(name, bones.len());
                bones.push(Bone {
                    name: name.to_string(),
                    parent: None,
                    local: Isometry3::identity(),
                    model: Isometry3::identity(),
                });
            }
        }
        if bones.is_empty() {
            return Err(RigError::Empty);
        }

        for node in doc.descendants().filter(|n| n.has_tag_name("joint")) {
            let joint = node.attribute("name").unwrap_or("unnamed");
            let (Some(parent), Some(child)) = (link_of(node, "parent"), link_of(node, "child")) else {
                log::warn!("joint '{joint}' is missing a parent or child link");
                continue;
            };
            let lookup = |link: &str| {
                ids.get(link).copied().ok_or_else(|| RigError::UnknownLink {
                    joint: joint.to_string(),
                    link: link.to_string(),
                })
            };
            let (parent, child) = (lookup(parent)?, lookup(child)?);

            let bone = &mut bones[child];
            if bone.parent.is_some() {
                return Err(RigError::MultipleParents(bone.name.clone()));
            }
            bone.parent = Some(parent);
            bone.local = parse_origin(node.children().find(|n| n.has_tag_name("origin")));
        }

        let root = bones.iter().position(|b| b.parent.is_none()).ok_or(RigError::NoRoot)?;
        let mut rig = Self { bones, root };
        rig.compose();
        log::info!("rig loaded: {} bones, root '{}'", rig.bones.len(), rig.bones[root].name);
        Ok(rig)
    }

    // Breadth-first from the root so parents are always composed first.
    fn compose(&mut self) {
        let mut queue = VecDeque::from([self.root]);
        while let Some(id) = queue.pop_front() {
            let parent = self.bones[id].parent.map(|p| self.bones[p].model);
            let bone = &mut self.bones[id];
            bone.model = match parent {
                Some(parent) => parent * bone.local,
                None => bone.local,
            };
            queue.extend(self.child_bones(id));
        }
    }

    pub fn root(&self) -> BoneId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.bones.get(id)
    }

    pub fn find(&self, name: &str) -> Option<BoneId> {
        self.bones.iter().position(|b| b.name == name)
    }

    /// Last bone reached by following first children from `bone`.
    pub fn tip(&self, bone: BoneId) -> BoneId {
        let mut current = bone;
        while let Some(&next) = self.child_bones(current).first() {
            current = next;
        }
        current
    }

    /// Rest positions of the leg tips, one per root child, in model space.
    pub fn foot_positions(&self) -> Vec<Point3<f32>> {
        self.child_bones(self.root)
            .into_iter()
            .filter_map(|leg| self.bone_position(self.tip(leg)))
            .collect()
    }
}

impl Skeleton for Rig {
    fn bone_position(&self, bone: BoneId) -> Option<Point3<f32>> {
        self.bones.get(bone).map(|b| Point3::from(b.model.translation.vector))
    }

    fn child_bones(&self, root: BoneId) -> Vec<BoneId> {
        self.bones
            .iter()
            .enumerate()
            .filter(|(_, b)| b.parent == Some(root))
            .map(|(id, _)| id)
            .collect()
    }
}

fn link_of<'a>(joint: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    joint.children().find(|n| n.has_tag_name(tag)).and_then(|n| n.attribute("link"))
}

fn parse_triple(text: Option<&str>) -> Vector3<f32> {
    let v: Vec<f32> = text
        .map(|s| s.split_whitespace().filter_map(|s| s.parse().ok()).collect())
        .unwrap_or_default();
    if v.len() == 3 {
        Vector3::new(v[0], v[1], v[2])
    } else {
        Vector3::zeros()
    }
}

fn parse_origin(node: Option<Node>) -> Isometry3<f32> {
    let xyz = parse_triple(node.and_then(|n| n.attribute("xyz")));
    let rpy = parse_triple(node.and_then(|n| n.attribute("rpy")));
    Isometry3::from_parts(
        Translation3::from(xyz),
        UnitQuaternion::from_euler_angles(rpy.x, rpy.y, rpy.z),
    )
}
