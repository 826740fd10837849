// Phase 3: ボックス ⇔ グリフ割り当て表（双方向マッピング）

use std::collections::BTreeMap;

use crate::error::{GlyphTracerError, Result};
use crate::glyph::repertoire::{GlyphId, GlyphSpec, Repertoire};
use crate::raster::GlyphBox;

/// A glyph that owns a box, ready for tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimedGlyph {
    pub name: String,
    pub codepoint: char,
    pub glyph_box: GlyphBox,
}

/// Segmented boxes together with their owners.
///
/// Holds the two directions of the relation, `box -> glyph` and
/// `glyph -> box`. Every mutation goes through [`BoxAssignments::assign`],
/// [`BoxAssignments::unassign_glyph`] or [`BoxAssignments::release_box`], so
/// the two maps never disagree.
#[derive(Debug, Clone)]
pub struct BoxAssignments {
    boxes: Vec<GlyphBox>,
    owners: Vec<Option<GlyphId>>,
    glyph_boxes: BTreeMap<GlyphId, usize>,
}

impl BoxAssignments {
    pub fn new(boxes: Vec<GlyphBox>) -> Self {
        let owners = vec![None; boxes.len()];
        Self {
            boxes,
            owners,
            glyph_boxes: BTreeMap::new(),
        }
    }

    pub fn boxes(&self) -> &[GlyphBox] {
        &self.boxes
    }

    /// ボックス `box_index` をグリフ `glyph` に割り当てる。
    ///
    /// ボックスが別のグリフに割り当て済みならその割り当てを外し、
    /// グリフが以前持っていたボックスは解放する。
    pub fn assign(&mut self, glyph: GlyphId, box_index: usize) -> Result<()> {
        if box_index >= self.boxes.len() {
            return Err(GlyphTracerError::config(format!(
                "box index {box_index} out of range ({} boxes)",
                self.boxes.len()
            )));
        }

        self.release_box(box_index);
        self.unassign_glyph(glyph);

        self.owners[box_index] = Some(glyph);
        self.glyph_boxes.insert(glyph, box_index);
        Ok(())
    }

    /// Drop the glyph's box, if it has one. Returns the freed box index.
    pub fn unassign_glyph(&mut self, glyph: GlyphId) -> Option<usize> {
        let box_index = self.glyph_boxes.remove(&glyph)?;
        self.owners[box_index] = None;
        Some(box_index)
    }

    /// Free a box from its owner. Returns the previous owner.
    pub fn release_box(&mut self, box_index: usize) -> Option<GlyphId> {
        let owner = self.owners.get_mut(box_index)?.take()?;
        self.glyph_boxes.remove(&owner);
        Some(owner)
    }

    pub fn owner_of(&self, box_index: usize) -> Option<GlyphId> {
        self.owners.get(box_index).copied().flatten()
    }

    pub fn box_of(&self, glyph: GlyphId) -> Option<&GlyphBox> {
        self.glyph_boxes.get(&glyph).map(|&i| &self.boxes[i])
    }

    pub fn is_claimed(&self, box_index: usize) -> bool {
        self.owner_of(box_index).is_some()
    }

    pub fn claimed_count(&self) -> usize {
        self.glyph_boxes.len()
    }

    /// Glyphs that own a box, in repertoire order.
    pub fn claimed_glyphs(&self, repertoire: &Repertoire) -> Vec<ClaimedGlyph> {
        self.glyph_boxes
            .iter()
            .filter_map(|(&id, &box_index)| {
                let GlyphSpec { name, codepoint } = repertoire.get(id)?;
                Some(ClaimedGlyph {
                    name: name.clone(),
                    codepoint: *codepoint,
                    glyph_box: self.boxes[box_index],
                })
            })
            .collect()
    }
}
