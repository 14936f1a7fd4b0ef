/// WGSL shader for lit, fogged, shadow-receiving scene meshes.
pub const SCENE_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
    camera_forward: vec4<f32>,
    // rgb, a = enabled
    fog_color: vec4<f32>,
    // near, far
    fog_range: vec4<f32>,
    // rgb, a = intensity
    hemi_sky: vec4<f32>,
    hemi_ground: vec4<f32>,
    // xyz towards the light, w = casts shadow
    light_dir: vec4<f32>,
    // rgb, a = intensity
    light_color: vec4<f32>,
    // texel size, depth bias
    shadow_params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var shadow_map: texture_depth_2d;
@group(1) @binding(1)
var shadow_sampler: sampler_comparison;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
    @location(7) flags: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) receive_shadow: f32,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = globals.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.color = instance.color;
    out.receive_shadow = instance.flags.x;
    return out;
}

fn shadow_factor(world_pos: vec3<f32>) -> f32 {
    let light_clip = globals.light_view_proj * vec4<f32>(world_pos, 1.0);
    let ndc = light_clip.xyz / light_clip.w;
    let uv = vec2<f32>(ndc.x * 0.5 + 0.5, -ndc.y * 0.5 + 0.5);
    if (uv.x < 0.0 || uv.x > 1.0 || uv.y < 0.0 || uv.y > 1.0 || ndc.z > 1.0) {
        return 1.0;
    }
    let texel = globals.shadow_params.x;
    let depth = ndc.z - globals.shadow_params.y;
    var lit = 0.0;
    for (var x = -1; x <= 1; x++) {
        for (var y = -1; y <= 1; y++) {
            let offset = vec2<f32>(f32(x), f32(y)) * texel;
            lit += textureSampleCompareLevel(shadow_map, shadow_sampler, uv + offset, depth);
        }
    }
    return lit / 9.0;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);

    let hemi_weight = 0.5 * n.y + 0.5;
    let hemi = mix(globals.hemi_ground.rgb, globals.hemi_sky.rgb, hemi_weight) * globals.hemi_sky.a;

    var shadow = 1.0;
    if (in.receive_shadow > 0.5 && globals.light_dir.w > 0.5) {
        shadow = shadow_factor(in.world_pos);
    }
    let n_dot_l = max(dot(n, globals.light_dir.xyz), 0.0);
    let direct = globals.light_color.rgb * globals.light_color.a * n_dot_l * shadow;

    var rgb = in.color.rgb * (hemi + direct);

    if (globals.fog_color.a > 0.5) {
        let depth = dot(in.world_pos - globals.camera_pos.xyz, globals.camera_forward.xyz);
        let fog = smoothstep(globals.fog_range.x, globals.fog_range.y, depth);
        rgb = mix(rgb, globals.fog_color.rgb, fog);
    }

    return vec4<f32>(rgb, in.color.a);
}
"#;

/// Depth-only shader rendering shadow casters from the light.
pub const SHADOW_SHADER: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    light_view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

@vertex
fn vs_shadow(vertex: VertexInput, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    return globals.light_view_proj * model * vec4<f32>(vertex.position, 1.0);
}
"#;
