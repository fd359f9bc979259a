//! Fixed instruction payload and response contract for scene planning.
//!
//! The planner is asked to build a "digital twin" specification of the
//! product first, store it verbatim in `master_product_description`, and
//! prefix every shot prompt with it. None of this can be verified from the
//! client side; it is trusted external behavior.

use serde_json::{json, Value};
use shotlist_models::ProductCategory;

/// System instruction sent with every planning request.
pub const SCENE_PLAN_INSTRUCTION: &str = r#"
# ROLE
You are a creative director and digital twin specialist. You write prompts for a
photorealistic rendering engine.

# GOAL
Produce a sequence of shot prompts whose renders show the product as an exact,
engineering-grade replica of the product in the supplied photos. Product accuracy
outranks every creative consideration.

# DIRECTIVE: DIGITAL TWIN FIDELITY
The supplied photos are ground truth. Do not reinterpret the product. Any change to
geometry, material, proportions or feature placement is a failure.

# STEP 1: DIGITAL TWIN SPECIFICATION (do this first)
Reverse-engineer the product from the photos into a structured technical
specification, as if preparing a CAD blueprint. Cover:
  * Component inventory: every distinct part of the product.
  * Geometry and dimensions: shape, profile and relative size of each component,
    in precise technical language.
  * Materials and finishes: exact material and surface finish of each component.
  * Assembly and placement: how components connect and where features sit.
Write the complete specification into `master_product_description`.

# STEP 2: SCENE AND SHOT PROMPTS
Only after STEP 1, design a high-end environment matching DESIRED_STYLE and write it
into `master_scene_description`. Plan 5 to 6 shots: wide lifestyle views, medium
angles, and detail shots of specific components.

For EVERY shot in `shot_sequence`, build `prompt` as follows:
  1. Start with the complete, verbatim digital twin specification from STEP 1.
  2. Follow it with the shot-specific scene, camera (lens, angle, focus point) and
     lighting instructions.
Use the words "Lifestyle" in `shot_type` for wide environment shots.

# OUTPUT
Return only a JSON object that matches the provided response schema.
"#;

/// Per-request input block placed before the images.
pub fn scene_plan_input(category: ProductCategory, style: &str) -> String {
    format!(
        r#"[INPUTS]
PRODUCT_CATEGORY: "{category}"
DESIRED_STYLE: "{style}"

Using the desired style and, above all, the attached product images, generate the scene
prompts according to your instructions. The product replica must be exact."#,
        category = category.label(),
        style = style.trim(),
    )
}

/// Response schema for the planning call. Every field is required.
pub fn scene_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "scene_id": { "type": "STRING" },
            "master_scene_description": { "type": "STRING" },
            "master_product_description": { "type": "STRING" },
            "shot_sequence": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "shot_number": { "type": "INTEGER" },
                        "shot_type": { "type": "STRING" },
                        "prompt": { "type": "STRING" }
                    },
                    "required": ["shot_number", "shot_type", "prompt"]
                }
            }
        },
        "required": [
            "scene_id",
            "master_scene_description",
            "master_product_description",
            "shot_sequence"
        ]
    })
}
