use bogie::context::{gen_context, set_value_context, Context};
use bogie::decrypt::PlaintextDecryptor;
use bogie::error::Error;
use bogie::renderer::{MiniJinjaRenderer, TemplateRenderer};
use serde_yaml::Value;
use std::path::PathBuf;

fn context(env: &str, values: &str) -> Context {
    Context::new(serde_yaml::from_str(env).unwrap(), serde_yaml::from_str(values).unwrap())
}

#[test]
fn test_env_and_values_lookup() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("region: us-east-1", "replicas: 3");

    let result = renderer.render("region={{ Env.region }} n={{ Values.replicas }}", &ctx).unwrap();
    assert_eq!(result.content, "region=us-east-1 n=3");
    assert!(!result.is_empty);
}

#[test]
fn test_strict_mode_rejects_missing_keys() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("region: us-east-1", "{}");

    assert!(matches!(
        renderer.render("{{ Values.replicas }}", &ctx),
        Err(Error::TemplateError(_))
    ));
    assert!(renderer.render("{{ Env.zone }}", &ctx).is_err());
    assert!(renderer.render("{{ Undeclared }}", &ctx).is_err());
}

#[test]
fn test_defined_test_guards_optional_keys() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("{}", "{}");

    let result = renderer
        .render("{% if Values.replicas is defined %}{{ Values.replicas }}{% endif %}", &ctx)
        .unwrap();
    assert!(result.is_empty);
}

#[test]
fn test_whitespace_only_output_is_empty() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("{}", "enabled: false");

    let result = renderer
        .render("{% if Values.enabled %}\nkind: Service\n{% endif %}\n  \n", &ctx)
        .unwrap();
    assert!(result.is_empty);
}

#[test]
fn test_parse_error() {
    let renderer = MiniJinjaRenderer::new();
    assert!(renderer.render("{% if %}", &Context::default()).is_err());
}

#[test]
fn test_keeps_trailing_newline() {
    let renderer = MiniJinjaRenderer::new();
    let result = renderer.render("kind: Pod\n", &Context::default()).unwrap();
    assert_eq!(result.content, "kind: Pod\n");
}

#[test]
fn test_custom_delimiters() {
    let renderer = MiniJinjaRenderer::with_delimiters("[[", "]]").unwrap();
    let ctx = context("region: us-east-1", "{}");

    let result = renderer.render("[[ Env.region ]] {{ literal }}", &ctx).unwrap();
    assert_eq!(result.content, "us-east-1 {{ literal }}");
}

#[test]
fn test_conflicting_delimiters() {
    assert!(matches!(
        MiniJinjaRenderer::with_delimiters("{%", "%}"),
        Err(Error::ConfigError(_))
    ));
}

#[test]
fn test_function_library() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("{}", "name: MyService\nlabels:\n  tier: web\n");

    let result = renderer
        .render(
            "{{ Values.name | snake_case }} {{ Values.name | kebab_case }} {{ Values.name | upper }}",
            &ctx,
        )
        .unwrap();
    assert_eq!(result.content, "my_service my-service MYSERVICE");

    let result = renderer.render("{{ Values.labels | to_yaml }}", &ctx).unwrap();
    assert_eq!(result.content, "tier: web");

    let result = renderer.render("{{ Values.name | quote }}", &ctx).unwrap();
    assert_eq!(result.content, "\"MyService\"");

    let result = renderer.render("{{ ('a: 1' | from_yaml).a }}", &ctx).unwrap();
    assert_eq!(result.content, "1");

    let result = renderer
        .render("{{ Values.name | regex_replace('Service$', 'Job') }}", &ctx)
        .unwrap();
    assert_eq!(result.content, "MyJob");
}

#[test]
fn test_required_and_fail() {
    let renderer = MiniJinjaRenderer::new();
    let ctx = context("{}", "image: ''");

    assert!(renderer.render("{{ required(Values.image, 'image is required') }}", &ctx).is_err());
    assert!(renderer.render("{{ fail('stop') }}", &ctx).is_err());
}

#[test]
fn test_absent_sources_match_empty_context() {
    let renderer = MiniJinjaRenderer::new();
    let decryptor = PlaintextDecryptor::new();
    let base = gen_context(None, &decryptor).unwrap();
    let resolved = set_value_context::<PathBuf>(&[], &[], &base, &decryptor).unwrap();
    let empty = Context::new(Value::Mapping(Default::default()), Value::Mapping(Default::default()));

    let template = "apiVersion: v1\n{% for i in range(2) %}- {{ i }}\n{% endfor %}";
    assert_eq!(
        renderer.render(template, &resolved).unwrap(),
        renderer.render(template, &empty).unwrap()
    );
}
