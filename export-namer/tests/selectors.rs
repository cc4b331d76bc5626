use decl_graph::{
  AccessorKind, BridgeParam, BridgeReturn, BridgeShape, Decl, GraphBuilder, WellKnown,
};
use export_namer::{ExportNamer, NamerConfig};
use name_alloc::TableMode;

fn namer(graph: &decl_graph::DeclGraph) -> ExportNamer<'_> {
  ExportNamer::new(graph, NamerConfig::default(), TableMode::Global).unwrap()
}

#[test]
fn labeled_first_parameter_merges_into_base() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let string = b.ty("String");
  let dog = b.add(m, u, Decl::class("Dog"));
  let speak = b.add(m, u, Decl::method("speak").in_(dog).param("sound", string));
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(speak).unwrap();
  assert_eq!(name.selector, "speakWithSound:");
  assert_eq!(name.nested_signature, "speak(sound:)");
}

#[test]
fn multiple_parameters_append_colon_terminated_labels() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let string = b.ty("String");
  let int = b.ty("Int");
  let dog = b.add(m, u, Decl::class("Dog"));
  let speak = b.add(
    m,
    u,
    Decl::method("speak")
      .in_(dog)
      .param("sound", string)
      .param("times", int),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(speak).unwrap();
  assert_eq!(name.selector, "speakWithSound:times:");
  assert_eq!(name.nested_signature, "speak(sound:times:)");
}

#[test]
fn zero_parameter_selector_has_no_colon() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let dog = b.add(m, u, Decl::class("Dog"));
  let bark = b.add(m, u, Decl::method("bark").in_(dog));
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(bark).unwrap();
  assert_eq!(name.selector, "bark");
  assert_eq!(name.nested_signature, "bark()");
}

#[test]
fn unlabeled_first_parameter_contributes_bare_colon() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let int = b.ty("Int");
  let dog = b.add(m, u, Decl::class("Dog"));
  let foo = b.add(m, u, Decl::method("foo").in_(dog).unlabeled_param(int));
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(foo).unwrap();
  assert_eq!(name.selector, "foo:");
  assert_eq!(name.nested_signature, "foo(_:)");
}

#[test]
fn synthesized_error_out_gets_fixed_label_and_is_omitted_nested() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let int = b.ty("Int");
  let dog = b.add(m, u, Decl::class("Dog"));
  let foo = b.add(
    m,
    u,
    Decl::method("foo").in_(dog).unlabeled_param(int).bridge(BridgeShape::new(
      vec![BridgeParam::Mapped, BridgeParam::ErrorOut],
      BridgeReturn::OutFlag,
    )),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(foo).unwrap();
  assert_eq!(name.selector, "foo:error:");
  assert_eq!(name.nested_signature, "foo(_:)");
}

#[test]
fn leading_out_parameter_uses_and_return_prefix() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let dog = b.add(m, u, Decl::class("Dog"));
  let fetch = b.add(
    m,
    u,
    Decl::method("fetch").in_(dog).bridge(BridgeShape::new(
      vec![BridgeParam::ErrorOut],
      BridgeReturn::OutFlag,
    )),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(fetch).unwrap();
  assert_eq!(name.selector, "fetchAndReturnError:");
  assert_eq!(name.nested_signature, "fetch()");
}

#[test]
fn result_out_parameters_keep_fixed_label_in_both_targets() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let int = b.ty("Int");
  let dog = b.add(m, u, Decl::class("Dog"));
  let compute = b.add(
    m,
    u,
    Decl::method("compute")
      .in_(dog)
      .param("seed", int)
      .bridge(BridgeShape::new(
        vec![BridgeParam::Mapped, BridgeParam::ResultOut],
        BridgeReturn::OutFlag,
      )),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  let name = namer.method_names(compute).unwrap();
  assert_eq!(name.selector, "computeWithSeed:result:");
  assert_eq!(name.nested_signature, "compute(seed:result:)");
}

#[test]
fn family_prefixes_are_neutralized() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Factory.kt");
  let factory = b.add(m, u, Decl::class("Factory"));
  let new_instance = b.add(m, u, Decl::method("newInstance").in_(factory));
  let copy = b.add(m, u, Decl::method("copy").in_(factory));
  let mutable_copy = b.add(m, u, Decl::method("mutableCopyOf").in_(factory));
  // `copyrighted` continues past the word boundary and is safe.
  let copyrighted = b.add(m, u, Decl::method("copyrighted").in_(factory));
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(namer.method_names(new_instance).unwrap().selector, "doNewInstance");
  assert_eq!(namer.method_names(copy).unwrap().selector, "doCopy");
  assert_eq!(
    namer.method_names(mutable_copy).unwrap().selector,
    "doMutableCopyOf"
  );
  assert_eq!(
    namer.method_names(copyrighted).unwrap().selector,
    "copyrighted"
  );
}

#[test]
fn constructors_build_init_selectors() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let string = b.ty("String");
  let dog = b.add(m, u, Decl::class("Dog"));
  let ctor = b.add(m, u, Decl::constructor().in_(dog).param("name", string));
  let empty = b.add(m, u, Decl::constructor().in_(dog));
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(namer.method_names(ctor).unwrap().selector, "initWithName:");
  assert_eq!(namer.method_names(ctor).unwrap().nested_signature, "init(name:)");
  assert_eq!(namer.method_names(empty).unwrap().selector, "init");
}

#[test]
fn array_constructors_rename_outside_nested_target() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Arrays.kt");
  let int = b.ty("Int");
  let arr = b.add(m, u, Decl::class("IntArray"));
  let ctor = b.add(
    m,
    u,
    Decl::constructor().in_(arr).param("size", int).constructs_array(),
  );
  let g = b.finish();

  let flat_only = NamerConfig {
    nested_target: false,
    ..NamerConfig::default()
  };
  let mut namer = ExportNamer::new(&g, flat_only, TableMode::Global).unwrap();
  assert_eq!(namer.method_names(ctor).unwrap().selector, "arrayWithSize:");

  let mut namer = ExportNamer::new(&g, NamerConfig::default(), TableMode::Global).unwrap();
  assert_eq!(namer.method_names(ctor).unwrap().selector, "initWithSize:");
}

#[test]
fn getters_and_setters_use_property_names() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let string = b.ty("String");
  let dog = b.add(m, u, Decl::class("Dog"));
  let name_prop = b.add(m, u, Decl::property("name").in_(dog));
  let getter = b.add(m, u, Decl::accessor(AccessorKind::Getter, name_prop).in_(dog));
  let setter = b.add(
    m,
    u,
    Decl::accessor(AccessorKind::Setter, name_prop)
      .in_(dog)
      .unlabeled_param(string),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(namer.method_names(getter).unwrap().selector, "name");
  assert_eq!(namer.method_names(setter).unwrap().selector, "setName:");
}

#[test]
fn reserved_runtime_selectors_are_avoided() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Dog.kt");
  let dog = b.add(m, u, Decl::class("Dog"));
  let release = b.add(m, u, Decl::method("release").in_(dog));
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(namer.method_names(release).unwrap().selector, "release_");
}

#[test]
fn override_with_matching_shape_shares_selector() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Animals.kt");
  let string = b.ty("String");
  let animal = b.add(m, u, Decl::interface("Animal"));
  let animal_speak = b.add(
    m,
    u,
    Decl::method("speak").in_(animal).param("sound", string),
  );
  let dog = b.add(m, u, Decl::class("Dog").extends(animal));
  let dog_speak = b.add(m, u, Decl::method("speak").in_(dog).param("sound", string));
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(
    namer.method_names(animal_speak).unwrap().selector,
    "speakWithSound:"
  );
  assert_eq!(
    namer.method_names(dog_speak).unwrap().selector,
    "speakWithSound:"
  );
}

#[test]
fn override_with_incompatible_shape_is_mangled() {
  let mut b = GraphBuilder::new();
  let m = b.module("zoo");
  let u = b.unit(m, "Animals.kt");
  let string = b.ty("String");
  let animal = b.add(m, u, Decl::interface("Animal"));
  let animal_speak = b.add(
    m,
    u,
    Decl::method("speak").in_(animal).param("sound", string),
  );
  let dog = b.add(m, u, Decl::class("Dog").extends(animal));
  // Same labels, but the bridge discards the return value: an incompatible
  // foreign signature that still produces the same selector candidate.
  let dog_speak = b.add(
    m,
    u,
    Decl::method("speak")
      .in_(dog)
      .param("sound", string)
      .bridge(BridgeShape::new(vec![BridgeParam::Mapped], BridgeReturn::Void)),
  );
  let g = b.finish();

  let mut namer = namer(&g);
  assert_eq!(
    namer.method_names(animal_speak).unwrap().selector,
    "speakWithSound:"
  );
  assert_eq!(
    namer.method_names(dog_speak).unwrap().selector,
    "speakWithSound_:"
  );
}

#[test]
fn root_members_keep_foreign_protocol_names() {
  let mut b = GraphBuilder::new();
  let rt = b.runtime_module("runtime");
  let u = b.unit(rt, "Root.kt");
  let any = b.ty("Any");
  let root = b.add(rt, u, Decl::class("Any").open());
  let equals = b.add(rt, u, Decl::method("equals").in_(root).param("other", any));
  let hash_code = b.add(rt, u, Decl::method("hashCode").in_(root));
  let to_string = b.add(rt, u, Decl::method("toString").in_(root));
  b.well_known(WellKnown::Root, root);
  b.well_known(WellKnown::Equals, equals);
  b.well_known(WellKnown::HashCode, hash_code);
  b.well_known(WellKnown::ToString, to_string);
  let g = b.finish();

  let mut namer = namer(&g);
  let equals_name = namer.method_names(equals).unwrap();
  assert_eq!(equals_name.selector, "isEqual:");
  assert_eq!(equals_name.nested_signature, "isEqual(_:)");
  assert_eq!(namer.method_names(hash_code).unwrap().selector, "hash");
  assert_eq!(namer.method_names(to_string).unwrap().selector, "description");
}
