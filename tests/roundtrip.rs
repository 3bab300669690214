use halforms::json::{self, HalFormsCodec, JsonError};
use halforms::{
    Affordance, Codec, Collection, Document, Embedded, EncodeError, IndexMap, Link, Method,
    OneOrMany, PageMetadata, Resource, Source,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
struct Employee {
    name: String,
    role: String,
}

fn frodo() -> Employee {
    Employee {
        name: "Frodo".into(),
        role: "ring bearer".into(),
    }
}

#[test]
fn roundtrip_single_resource() {
    let link = Link::self_link("/employees/1")
        .with_affordance(Affordance::new("default", Method::Get, "/employees/1"));
    let resource = Resource::from_serialize(&frodo(), vec![link]).unwrap();
    let document = Document::try_from(Source::Resource(resource)).unwrap();

    let bytes = HalFormsCodec::encode(&document).unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        r#"{"name":"Frodo","role":"ring bearer","_links":{"self":{"href":"/employees/1"}},"_templates":{"default":{"method":"GET","properties":[]}}}"#
    );

    let decoded: Document = HalFormsCodec::decode(&bytes).unwrap();
    assert_eq!(decoded.payload, document.payload);
    assert_eq!(decoded.templates, document.templates);
    assert_eq!(decoded.links.len(), 1);
    assert_eq!(decoded.links[0].rel, "self");
    assert_eq!(decoded.links[0].href, "/employees/1");

    let employee: Employee = decoded.payload_as().unwrap().unwrap();
    assert_eq!(employee.name, "Frodo");
    assert_eq!(employee.role, "ring bearer");
}

#[test]
fn affordances_build_the_template_map_in_link_order() {
    let link = Link::self_link("/employees/1")
        .with_affordance(Affordance::new("get", Method::Get, "/employees/1"))
        .with_affordance(
            Affordance::new("replace", Method::Put, "/employees/1")
                .with_field("name", true)
                .with_field("role", false),
        )
        .with_affordance(Affordance::new("remove", Method::Delete, "/employees/1"));
    let resource = Resource::from_serialize(&frodo(), vec![link]).unwrap();
    let document = Document::try_from(Source::Resource(resource)).unwrap();

    let keys: Vec<&str> = document.templates.keys().map(String::as_str).collect();
    assert_eq!(keys, ["default", "replace", "remove"]);
    assert_eq!(document.template().unwrap().method, Method::Get);
    assert_eq!(
        document.template_at("replace").unwrap().properties[0].name,
        "name"
    );
}

#[test]
fn mismatched_affordance_uri_aborts_the_encode() {
    let link = Link::self_link("/employees/1")
        .with_affordance(Affordance::new("move", Method::Put, "/employees/2"));
    let resource = Resource::from_serialize(&frodo(), vec![link]).unwrap();

    match Document::try_from(Source::Resource(resource)).unwrap_err() {
        EncodeError::UriMismatch {
            affordance_uri,
            self_path,
        } => {
            assert_eq!(affordance_uri, "/employees/2");
            assert_eq!(self_path, "/employees/1");
        }
        x => panic!("unexpected error: {:?}", x),
    }
}

#[test]
fn resource_without_self_link_has_no_templates() {
    let resource = Resource::from_serialize(&frodo(), vec![Link::new("up", "/employees")]).unwrap();
    let document = Document::try_from(Source::Resource(resource)).unwrap();
    assert!(document.templates.is_empty());

    let bytes = HalFormsCodec::encode(&document).unwrap();
    let decoded: Document = HalFormsCodec::decode(&bytes).unwrap();
    assert!(decoded.templates.is_empty());
}

#[test]
fn one_element_collection_of_maps_encodes_like_a_single_resource() {
    let single = Resource::from_serialize(&frodo(), vec![Link::self_link("/employees")]).unwrap();
    let collection =
        Collection::from_serialize([frodo()], vec![Link::self_link("/employees")]).unwrap();

    let single = Document::try_from(Source::Resource(single)).unwrap();
    let collapsed = Document::try_from(Source::Collection(collection)).unwrap();
    assert_eq!(
        HalFormsCodec::encode(&collapsed).unwrap(),
        HalFormsCodec::encode(&single).unwrap()
    );

    let larger =
        Collection::from_serialize([frodo(), frodo()], vec![Link::self_link("/employees")])
            .unwrap();
    let larger = Document::try_from(Source::Collection(larger)).unwrap();
    assert_eq!(larger.payload, None);
    assert_eq!(larger.collection.as_ref().map(Vec::len), Some(2));

    let scalars = Collection::from_serialize(["first"], vec![]).unwrap();
    let scalars = Document::try_from(Source::Collection(scalars)).unwrap();
    assert_eq!(scalars.collection, Some(vec![json!("first")]));
}

#[test]
fn embedded_collection_roundtrips_with_page_metadata() {
    let mut content = IndexMap::new();
    content.insert(
        "employees".to_string(),
        OneOrMany::Many(vec![
            serde_json::to_value(frodo()).unwrap(),
            json!({"name": "Bilbo", "role": "burglar"}),
        ]),
    );
    let embedded = Embedded::new(content, vec![Link::self_link("/employees")])
        .with_page(PageMetadata::new(2, 0, 4));
    let document = Document::try_from(Source::Embedded(embedded)).unwrap();

    let bytes = HalFormsCodec::encode(&document).unwrap();
    let decoded = json::from_slice_typed::<Employee>(&bytes).unwrap();
    assert_eq!(decoded.embedded, document.embedded);
    assert_eq!(decoded.page, Some(PageMetadata::new(2, 0, 4)));

    let employees: Vec<Employee> = decoded.embedded_as("employees").unwrap();
    assert_eq!(employees[0], frodo());
}

#[test]
fn typed_decoding_rejects_foreign_embedded_content() {
    let wire = br#"{"_embedded":{"employees":[{"name": "Frodo"}]}}"#;
    match json::from_slice_typed::<Employee>(wire).unwrap_err() {
        JsonError::Parse { expected, .. } => assert_eq!(expected, "embedded content"),
        x => panic!("unexpected error: {:?}", x),
    }

    assert!(json::from_slice(wire).is_ok());
}

#[test]
fn templates_section_polymorphism() {
    let object = json::from_str(r#"{"_templates":{"default":{"method":"POST"}}}"#).unwrap();
    let array = json::from_str(r#"{"_templates":{"default":[{"method":"POST"}]}}"#).unwrap();
    assert_eq!(object.templates, array.templates);
}
