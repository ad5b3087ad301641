//! GLSL sources for the macroquad backend.
//!
//! Grids are stored bottom row first, so kernels address cells through
//! `gl_FragCoord`, which uses the same orientation inside a render target.

use crate::domain::Rule;

/// Fullscreen quad vertex stage shared by the kernel and screen programs
pub const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 position;
attribute vec2 texcoord;
attribute vec4 color0;

varying lowp vec2 uv;

uniform mat4 Model;
uniform mat4 Projection;

void main() {
    gl_Position = Projection * Model * vec4(position, 1);
    uv = texcoord;
}
"#;

/// Draws channel 0 of a grid as an opaque grayscale image
pub const SCREEN_FRAGMENT_SHADER: &str = r#"#version 100
precision mediump float;

varying lowp vec2 uv;

uniform sampler2D Texture;

void main() {
    float state = texture2D(Texture, uv).r;
    gl_FragColor = vec4(vec3(state), 1.0);
}
"#;

/// Name of the sampler the kernel reads the front buffer from
pub const STATE_SAMPLER: &str = "State";

/// Name of the uniform holding the grid size in texels
pub const RESOLUTION_UNIFORM: &str = "Resolution";

/// Fragment shader evaluating `rule` for one cell.
/// Neighbours wrap around the grid edges.
pub fn rule_fragment_shader(rule: &dyn Rule) -> String {
    format!(
        r#"#version 100
precision mediump float;

// {name}: {notation}
uniform sampler2D {sampler};
uniform vec2 {resolution};

float alive_at(vec2 cell) {{
    vec2 wrapped = mod(cell, {resolution});
    return step(0.5, texture2D({sampler}, wrapped / {resolution}).r);
}}

bool born(int n) {{
    return {born};
}}

bool survives(int n) {{
    return {survives};
}}

void main() {{
    vec2 cell = floor(gl_FragCoord.xy) + 0.5;
    float sum = 0.0;
    for (int dy = -1; dy <= 1; dy++) {{
        for (int dx = -1; dx <= 1; dx++) {{
            if (dx != 0 || dy != 0) {{
                sum += alive_at(cell + vec2(float(dx), float(dy)));
            }}
        }}
    }}
    int n = int(sum + 0.5);
    bool alive = alive_at(cell) > 0.5 ? survives(n) : born(n);
    gl_FragColor = vec4(alive ? 1.0 : 0.0, 0.0, 0.0, 1.0);
}}
"#,
        name = rule.name(),
        notation = rule.notation(),
        sampler = STATE_SAMPLER,
        resolution = RESOLUTION_UNIFORM,
        born = count_test(rule.birth()),
        survives = count_test(rule.survival()),
    )
}

/// GLSL boolean expression matching `n` against a set of counts
fn count_test(counts: &[u8]) -> String {
    if counts.is_empty() {
        return "false".to_string();
    }
    counts
        .iter()
        .map(|c| format!("n == {c}"))
        .collect::<Vec<_>>()
        .join(" || ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConwayRule, SeedsRule};

    #[test]
    fn test_count_test_expressions() {
        assert_eq!(count_test(&[3]), "n == 3");
        assert_eq!(count_test(&[2, 3]), "n == 2 || n == 3");
        assert_eq!(count_test(&[]), "false");
    }

    #[test]
    fn test_conway_shader_embeds_rule() {
        let source = rule_fragment_shader(&ConwayRule);
        assert!(source.starts_with("#version 100"));
        assert!(source.contains("// Conway: B3/S23"));
        assert!(source.contains("return n == 3;"));
        assert!(source.contains("return n == 2 || n == 3;"));
        assert!(source.contains("uniform sampler2D State;"));
        assert!(source.contains("uniform vec2 Resolution;"));
    }

    #[test]
    fn test_seeds_never_survives() {
        let source = rule_fragment_shader(&SeedsRule);
        assert!(source.contains("bool survives(int n) {\n    return false;"));
    }

    #[test]
    fn test_braces_are_balanced() {
        let source = rule_fragment_shader(&ConwayRule);
        let open = source.matches('{').count();
        let close = source.matches('}').count();
        assert_eq!(open, close);
    }
}
