use super::*;
use crate::error::BcdError;
use nalgebra::point;
use proptest::prelude::*;

fn sample_column(cell: &mut Cell, x: f64, top: f64, bottom: f64) {
    cell.push_sample(point![x, top], point![x, bottom]);
}

#[test]
fn ids_count_from_zero_independently() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 4.0, UNSET_COLOR);
    let b = g.add_point_vertex(3.0, 2.0, 7);
    assert_eq!(a.id(), VertexId(0));
    assert_eq!(b.id(), VertexId(1));
    let e = g.add_edge(a, b, UNSET_COLOR).unwrap();
    assert_eq!(e.id(), EdgeId(0));
    assert_eq!(g[b.id()].y_top, g[b.id()].y_bottom);
    assert_eq!(g[b.id()].color, 7);
    assert_eq!(g[a.id()].color, UNSET_COLOR);
    assert_eq!(g.first_vertex(), Some(a));
}

#[test]
fn modify_end_nodes_keeps_identity_and_payload() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 4.0, 0);
    let e = g.add_edge(a, a, 0).unwrap();
    assert!(g.cell(e).unwrap().span().is_open());
    {
        let c = g.cell_mut(e).unwrap();
        sample_column(c, 0.0, -1.0, 4.0);
        sample_column(c, 1.0, -1.0, 4.0);
        c.update_cost();
    }
    let before = g.cell(e).unwrap().clone();

    let b = g.add_vertex(2.0, 0.0, 4.0, 0);
    let e2 = g.modify_end_nodes(e, b, None).unwrap();
    assert_eq!(e2, e);
    assert_eq!(g.edge_handle(e.id()), Some(e));

    let after = g.cell(e).unwrap();
    assert_eq!(after.span(), Span::Closed { first: b.id(), second: a.id() });
    assert_eq!(after.top_boundary(), before.top_boundary());
    assert_eq!(after.bottom_boundary(), before.bottom_boundary());
    assert_eq!(after.cost(), before.cost());
    assert_eq!(g.end_nodes(e).unwrap(), (b, a));
}

#[test]
fn rewiring_updates_incidence() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 1.0, 0);
    let b = g.add_vertex(1.0, 0.0, 1.0, 0);
    let c = g.add_vertex(2.0, 0.0, 1.0, 0);
    let e = g.add_edge(a, b, 0).unwrap();
    assert_eq!(g.degree(b).unwrap(), 1);
    g.modify_end_nodes(e, a, Some(c)).unwrap();
    assert_eq!(g.degree(b).unwrap(), 0);
    assert_eq!(g.degree(c).unwrap(), 1);
    assert_eq!(g.out_edges(a).unwrap().collect::<Vec<_>>(), vec![e]);
}

#[test]
fn null_sentinels_never_match_real_handles() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let e = g.add_edge(v, v, 0).unwrap();
    assert_ne!(TopologyGraph::null_vertex(), Some(v));
    assert_ne!(TopologyGraph::null_edge(), Some(e));
    assert_eq!(g.find_common_vertex(None, Some(e)).unwrap(), None);
    assert_eq!(g.find_common_vertex(Some(e), TopologyGraph::null_edge()).unwrap(), None);
}

#[test]
fn clear_is_idempotent_and_invalidates_handles() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let e = g.add_edge(v, v, 0).unwrap();
    g.clear();
    g.clear();
    assert_eq!(g.num_vertices(), 0);
    assert_eq!(g.num_edges(), 0);
    assert!(g.is_empty());

    let fresh = g.add_vertex(5.0, 0.0, 1.0, 0);
    assert_eq!(fresh.id(), VertexId(0));
    assert!(matches!(
        g.vertex(v),
        Err(BcdError::InvalidHandle { kind: "vertex", id: 0 })
    ));
    assert!(matches!(g.cell(e), Err(BcdError::InvalidHandle { kind: "edge", .. })));
    assert!(g.vertex(fresh).is_ok());
}

#[test]
fn handles_from_another_graph_are_rejected() {
    let mut g = TopologyGraph::new();
    let mut h = TopologyGraph::new();
    let gv = g.add_vertex(0.0, 0.0, 1.0, 0);
    let hv = h.add_vertex(0.0, 0.0, 1.0, 0);
    assert_eq!(gv.id(), hv.id());
    assert!(h.vertex(gv).is_err());
    assert!(h.add_edge(hv, gv, 0).is_err());
    assert_eq!(h.num_edges(), 0);
}

#[test]
fn clone_is_a_separate_graph() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let mut copy = g.clone();
    assert!(copy.equals(&g));
    assert!(copy.vertex(v).is_err());
    assert_eq!(copy.vertex_handle(VertexId(0)).map(|h| h.id()), Some(v.id()));

    // Both sides grow independently; neither resolves the other's handles.
    let gv = g.add_vertex(10.0, 0.0, 1.0, 0);
    let cv = copy.add_vertex(99.0, 0.0, 1.0, 0);
    assert_eq!(gv.id(), cv.id());
    assert!(matches!(
        g.vertex(cv),
        Err(BcdError::InvalidHandle { kind: "vertex", .. })
    ));
    assert!(g.add_edge(cv, cv, 0).is_err());
    assert!(copy.add_edge(gv, v, 0).is_err());
    assert_eq!(g.num_edges(), 0);
    assert_eq!(copy.num_edges(), 0);
    assert_eq!(copy.vertex(cv).unwrap().x, 99.0);
    assert_eq!(g.vertex(gv).unwrap().x, 10.0);
}

#[test]
fn clone_edge_copies_payload_under_new_id() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 2.0, 0);
    let b = g.add_vertex(3.0, 0.0, 2.0, 0);
    let e = g.add_edge(a, b, 9).unwrap();
    {
        let c = g.cell_mut(e).unwrap();
        sample_column(c, 0.0, -1.0, 2.0);
        c.update_cost();
    }
    g.update_cell_areas();
    let copy = g.clone_edge(e).unwrap();
    assert_eq!(copy.id(), EdgeId(1));

    let (src, dst) = (g.cell(e).unwrap(), g.cell(copy).unwrap());
    assert_eq!(dst.color, 9);
    assert_eq!(dst.cost(), src.cost());
    assert_eq!(dst.top_boundary(), src.top_boundary());
    assert_eq!(dst.span(), src.span());
    assert_eq!(dst.area(), 0.0);
    assert_eq!(g.degree(a).unwrap(), 2);
    assert_eq!(g.find_common_vertex(Some(e), Some(copy)).unwrap(), Some(a));
}

#[test]
fn self_loop_counts_once() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let e = g.add_edge(v, v, 0).unwrap();
    assert_eq!(g.degree(v).unwrap(), 1);
    assert_eq!(g.out_edges(v).unwrap().collect::<Vec<_>>(), vec![e]);
    assert!(g.cell(e).unwrap().span().touches(v.id()));
}

#[test]
fn equals_compares_id_tables_only() {
    let build = |reverse: bool| {
        let mut g = TopologyGraph::new();
        let a = g.add_vertex(0.0, 0.0, 1.0, 0);
        let b = g.add_vertex(1.0, 0.0, 1.0, 0);
        if reverse {
            g.add_edge(b, a, 0).unwrap();
        } else {
            g.add_edge(a, b, 0).unwrap();
        }
        g
    };
    assert!(build(false).equals(&build(false)));
    assert!(!build(false).equals(&build(true)));

    let mut moved = build(false);
    moved[VertexId(0)].x = 42.0;
    assert!(moved.equals(&build(false)));
}

#[test]
fn color_resets() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, UNSET_COLOR);
    let e = g.add_edge(v, v, UNSET_COLOR).unwrap();
    g.reset_all_vertex_color();
    assert_eq!(g.vertex(v).unwrap().color, 0);
    assert_eq!(g.cell(e).unwrap().color, UNSET_COLOR);
    g[e.id()].color = 3;
    g.vertex_mut(v).unwrap().color = 3;
    g.reset_all_color();
    assert_eq!(g[v.id()].color, 0);
    assert_eq!(g[e.id()].color, 0);
}

#[test]
fn lookups_out_of_range() {
    let g = TopologyGraph::new();
    assert_eq!(g.vertex_handle(VertexId(0)), None);
    assert_eq!(g.edge_handle(EdgeId(3)), None);
    assert_eq!(g.first_vertex(), None);
    assert_eq!(g.vertices().count(), 0);
}

#[test]
fn taller_cells_of_equal_length_cost_less() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let short = g.add_edge(v, v, 0).unwrap();
    let tall = g.add_edge(v, v, 0).unwrap();
    for x in 0..4 {
        sample_column(g.cell_mut(short).unwrap(), x as f64, 0.0, 2.0);
        sample_column(g.cell_mut(tall).unwrap(), x as f64, 0.0, 5.0);
    }
    g.update_cell_costs();
    let (cs, ct) = (
        g.cell(short).unwrap().cost().unwrap(),
        g.cell(tall).unwrap().cost().unwrap(),
    );
    assert!((cs - 16.0 / 8.0).abs() < 1e-12);
    assert!(ct < cs);
}

#[test]
fn empty_cell_has_no_cost() {
    let mut g = TopologyGraph::new();
    let v = g.add_vertex(0.0, 0.0, 1.0, 0);
    let e = g.add_edge(v, v, 0).unwrap();
    g.update_cell_costs();
    assert_eq!(g.cell(e).unwrap().cost(), None);
    assert!(g.cell(e).unwrap().is_empty());
}

#[test]
fn area_and_travel_cost() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 4.0, 0);
    let b = g.add_vertex(3.0, 2.0, 6.0, 0);
    let e = g.add_edge(a, b, 0).unwrap();
    for x in 0..3 {
        sample_column(g.cell_mut(e).unwrap(), x as f64, 0.0, 4.0);
    }
    g.update_cell_areas();
    g.update_travel_costs();
    let c = g.cell(e).unwrap();
    assert_eq!(c.area(), 12.0);
    // midpoints (0, 2) and (3, 4)
    assert!((c.travel_cost().unwrap() - 13f64.sqrt()).abs() < 1e-12);
    assert_eq!(c.polygon().len(), 6);
    assert_eq!(c.midline().next(), Some(point![0.0, 2.0]));
}

#[test]
fn dump_lists_edges_then_vertices() {
    let mut g = TopologyGraph::new();
    let a = g.add_vertex(0.0, 0.0, 2.0, 0);
    let b = g.add_vertex(2.0, 0.0, 2.0, 0);
    g.add_edge(a, b, 0).unwrap();
    let text = GraphDump(&g).to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[Eid 0, travelCost -, areaCost 0"));
    assert!(lines[0].ends_with("(0, 1) (2, 1)"));
    assert_eq!(lines[1], "0 [x 0, y1 0, y2 2]");
    assert!(g.to_string().contains("connected to edges: 0"));
}

#[derive(Clone, Debug)]
enum Op {
    AddVertex,
    AddEdge(usize, usize),
    Rewire(usize, usize, Option<usize>),
    CloneEdge(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::AddVertex),
        (0usize..16, 0usize..16).prop_map(|(a, b)| Op::AddEdge(a, b)),
        (0usize..16, 0usize..16, proptest::option::of(0usize..16))
            .prop_map(|(e, a, b)| Op::Rewire(e, a, b)),
        (0usize..16).prop_map(Op::CloneEdge),
    ]
}

proptest! {
    // Incidence lists stay consistent with spans under any mix of operations.
    #[test]
    fn incidence_matches_spans(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut g = TopologyGraph::new();
        g.add_vertex(0.0, 0.0, 1.0, 0);
        for op in ops {
            let nv = g.num_vertices();
            let ne = g.num_edges();
            let vh = |g: &TopologyGraph, i: usize| g.vertex_handle(VertexId(i % nv));
            match op {
                Op::AddVertex => { g.add_vertex(nv as f64, 0.0, 1.0, 0); }
                Op::AddEdge(a, b) => {
                    let (a, b) = (vh(&g, a).unwrap(), vh(&g, b).unwrap());
                    g.add_edge(a, b, 0).unwrap();
                }
                Op::Rewire(e, a, b) if ne > 0 => {
                    let e = g.edge_handle(EdgeId(e % ne)).unwrap();
                    let a = vh(&g, a).unwrap();
                    let b = b.and_then(|b| vh(&g, b));
                    prop_assert_eq!(g.modify_end_nodes(e, a, b).unwrap(), e);
                }
                Op::CloneEdge(e) if ne > 0 => {
                    let e = g.edge_handle(EdgeId(e % ne)).unwrap();
                    let c = g.clone_edge(e).unwrap();
                    prop_assert_eq!(c.id(), EdgeId(ne));
                }
                _ => {}
            }
        }
        let mut total = 0usize;
        for v in g.vertices() {
            let listed: Vec<EdgeId> = g.out_edges(v).unwrap().map(|e| e.id()).collect();
            let mut sorted = listed.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(&listed, &sorted);
            for id in &listed {
                prop_assert!(g[*id].span().touches(v.id()));
            }
            prop_assert_eq!(listed.len(), g.degree(v).unwrap());
            total += listed.len();
        }
        let expected: usize = g
            .cells()
            .map(|c| { let (a, b) = c.span().endpoints(); if a == b { 1 } else { 2 } })
            .sum();
        prop_assert_eq!(total, expected);
    }
}
