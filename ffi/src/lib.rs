use engine::api::{
    builtin_battle, simulate_battle, simulate_battle_many, BattleConfig,
};
use jni::objects::{JClass, JString};
use jni::sys::{jint, jlong, jstring};
use jni::JNIEnv;
use serde_json::json;

const DEFAULT_SAMPLES: u32 = 100;

fn ok(env: &JNIEnv, value: serde_json::Value) -> jstring {
    to_jstring(env, envelope_ok(value))
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    to_jstring(env, envelope_err(e))
}

fn to_jstring(env: &JNIEnv, body: String) -> jstring {
    match env.new_string(body) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn envelope_ok(value: serde_json::Value) -> String {
    json!({ "ok": true, "result": value }).to_string()
}

fn envelope_err(e: impl std::fmt::Display) -> String {
    json!({ "ok": false, "error": format!("{:#}", e) }).to_string()
}

#[no_mangle]
pub extern "system" fn Java_com_arena_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    to_jstring(&env, format!("arena-ffi {}", env!("CARGO_PKG_VERSION")))
}

#[no_mangle]
pub extern "system" fn Java_com_arena_Ffi_simulateBattleJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    to_jstring(&env, simulate_battle_json(&input))
}

#[no_mangle]
pub extern "system" fn Java_com_arena_Ffi_simulateBattleManyJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    to_jstring(&env, simulate_battle_many_json(&input))
}

#[no_mangle]
pub extern "system" fn Java_com_arena_Ffi_simulateBuiltinJson(
    mut env: JNIEnv,
    _class: JClass,
    id: JString,
    seed: jlong,
) -> jstring {
    let id: String = match env.get_string(&id) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    let mut cfg = match builtin_battle(&id) {
        Ok(cfg) => cfg,
        Err(e) => return err(&env, e),
    };
    cfg.seed = seed as u64;
    match simulate_battle(cfg).and_then(|r| Ok(serde_json::to_value(r)?)) {
        Ok(value) => ok(&env, value),
        Err(e) => err(&env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_arena_Ffi_builtinCount(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
) -> jint {
    engine::content::builtin_battles().len() as jint
}

// JSON-in/JSON-out bodies, callable without a JVM.

pub fn simulate_battle_json(input: &str) -> String {
    let cfg: BattleConfig = match serde_json::from_str(input) {
        Ok(c) => c,
        Err(e) => return envelope_err(format!("invalid_config: {}", e)),
    };
    match simulate_battle(cfg).and_then(|r| Ok(serde_json::to_value(r)?)) {
        Ok(value) => envelope_ok(value),
        Err(e) => envelope_err(e),
    }
}

pub fn simulate_battle_many_json(input: &str) -> String {
    let mut root: serde_json::Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => return envelope_err(format!("invalid_config: {}", e)),
    };
    let samples = match root.get("samples").and_then(|v| v.as_u64()) {
        None => DEFAULT_SAMPLES,
        Some(n) => match u32::try_from(n) {
            Ok(n) => n,
            Err(_) => return envelope_err(format!("invalid_config: samples {} out of range", n)),
        },
    };
    if let Some(obj) = root.as_object_mut() {
        obj.remove("samples");
    }
    let cfg: BattleConfig = match serde_json::from_value(root) {
        Ok(c) => c,
        Err(e) => return envelope_err(format!("invalid_config: {}", e)),
    };
    match simulate_battle_many(cfg, samples).and_then(|s| Ok(serde_json::to_value(s)?)) {
        Ok(value) => envelope_ok(value),
        Err(e) => envelope_err(e),
    }
}
