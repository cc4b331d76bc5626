use decl_graph::{BridgeParam, BridgeReturn, BridgeShape, Decl, GraphBuilder};
use export_namer::{ExportNamer, NamerConfig};
use name_alloc::TableMode;

#[test]
fn module_export_scenario() {
  let mut b = GraphBuilder::new();
  let m = b.module("MyLib");
  let u = b.unit(m, "MyFile.kt");
  let string = b.ty("String");

  // Top-level functions synthesize one container type per unit.
  let container = b.add(m, u, Decl::file_container());
  let f = b.add(m, u, Decl::method("f").in_(container).type_level());
  let g_fn = b.add(m, u, Decl::method("g").in_(container).type_level());

  // Unrelated final classes with identical members.
  let dog = b.add(m, u, Decl::class("Dog"));
  let robot = b.add(m, u, Decl::class("Robot"));
  let dog_speak = b.add(m, u, Decl::method("speak").in_(dog).param("sound", string));
  let robot_speak = b.add(m, u, Decl::method("speak").in_(robot).param("sound", string));

  let graph = b.finish();
  let mut namer = ExportNamer::new(&graph, NamerConfig::default(), TableMode::Global).unwrap();
  namer.assign_all().unwrap();

  let container_name = namer.type_names(container).unwrap();
  assert_eq!(container_name.flat, "MYLMyFileKt");
  assert_eq!(container_name.nested, "MyFileKt");

  assert_eq!(namer.method_names(f).unwrap().selector, "f");
  assert_eq!(namer.method_names(g_fn).unwrap().selector, "g");

  // No common ancestor: sharing the selector is legal.
  assert_eq!(namer.method_names(dog_speak).unwrap().selector, "speakWithSound:");
  assert_eq!(
    namer.method_names(robot_speak).unwrap().selector,
    "speakWithSound:"
  );
}

#[test]
fn override_convergence_through_shared_interface() {
  let mut b = GraphBuilder::new();
  let m = b.module("MyLib");
  let u = b.unit(m, "Animals.kt");
  let string = b.ty("String");

  let animal = b.add(m, u, Decl::interface("Animal"));
  let dog = b.add(m, u, Decl::class("Dog").extends(animal));
  let robot = b.add(m, u, Decl::class("Robot").extends(animal));
  let dog_speak = b.add(m, u, Decl::method("speak").in_(dog).param("sound", string));
  let robot_speak = b.add(m, u, Decl::method("speak").in_(robot).param("sound", string));

  let graph = b.finish();
  let mut namer = ExportNamer::new(&graph, NamerConfig::default(), TableMode::Global).unwrap();

  // Matching bridge shapes: both implementations keep the converged selector.
  assert_eq!(namer.method_names(dog_speak).unwrap().selector, "speakWithSound:");
  assert_eq!(
    namer.method_names(robot_speak).unwrap().selector,
    "speakWithSound:"
  );
}

#[test]
fn incompatible_override_is_mangled() {
  let mut b = GraphBuilder::new();
  let m = b.module("MyLib");
  let u = b.unit(m, "Animals.kt");
  let string = b.ty("String");

  let animal = b.add(m, u, Decl::interface("Animal"));
  let speak = b.add(m, u, Decl::method("speak").in_(animal).param("sound", string));
  let dog = b.add(m, u, Decl::class("Dog").extends(animal));
  let dog_speak = b.add(
    m,
    u,
    Decl::method("speak")
      .in_(dog)
      .param("sound", string)
      .bridge(BridgeShape::new(vec![BridgeParam::Mapped], BridgeReturn::Void)),
  );

  let graph = b.finish();
  let mut namer = ExportNamer::new(&graph, NamerConfig::default(), TableMode::Global).unwrap();
  namer.assign_all().unwrap();

  assert_eq!(namer.method_names(speak).unwrap().selector, "speakWithSound:");
  assert_eq!(namer.method_names(dog_speak).unwrap().selector, "speakWithSound_:");
}

#[test]
fn assignment_is_deterministic_across_sessions() {
  let build = || {
    let mut b = GraphBuilder::new();
    let m = b.module("MyLib");
    let u = b.unit(m, "Api.kt");
    let animal = b.add(m, u, Decl::interface("Animal"));
    let dog = b.add(m, u, Decl::class("Dog").extends(animal));
    let a = b.add(m, u, Decl::method("run").in_(animal));
    let d = b.add(
      m,
      u,
      Decl::method("run")
        .in_(dog)
        .bridge(BridgeShape::new(vec![], BridgeReturn::Void)),
    );
    (b.finish(), animal, dog, a, d)
  };

  let (g1, _, _, a1, d1) = build();
  let (g2, _, _, a2, d2) = build();
  let mut n1 = ExportNamer::new(&g1, NamerConfig::default(), TableMode::Global).unwrap();
  let mut n2 = ExportNamer::new(&g2, NamerConfig::default(), TableMode::Global).unwrap();
  n1.assign_all().unwrap();
  n2.assign_all().unwrap();

  assert_eq!(
    n1.method_names(a1).unwrap(),
    n2.method_names(a2).unwrap()
  );
  assert_eq!(
    n1.method_names(d1).unwrap(),
    n2.method_names(d2).unwrap()
  );
}

#[test]
fn local_mode_does_not_persist_between_calls() {
  let mut b = GraphBuilder::new();
  let m = b.module("MyLib");
  let u = b.unit(m, "Animals.kt");
  let animal = b.add(m, u, Decl::interface("Animal"));
  let run = b.add(m, u, Decl::method("run").in_(animal));
  let dog = b.add(m, u, Decl::class("Dog").extends(animal));
  let dog_run = b.add(
    m,
    u,
    Decl::method("run")
      .in_(dog)
      .bridge(BridgeShape::new(vec![], BridgeReturn::Void)),
  );
  let graph = b.finish();

  let mut namer = ExportNamer::new(&graph, NamerConfig::default(), TableMode::Local).unwrap();
  // Both receive the base candidate: nothing was recorded in between.
  assert_eq!(namer.method_names(run).unwrap().selector, "run");
  assert_eq!(namer.method_names(dog_run).unwrap().selector, "run");
}
