#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;
    use std::str::FromStr;

    use petgraph::graphmap::UnGraphMap;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::builder::{initialize, Builder, GridBuilder};
    use crate::error::{ConfigurationError, GenerationError, InitError, InvalidMove};
    use crate::grid::Grid;
    use crate::layout::kruskal::{gen_edges, spanning_tree};
    use crate::layout::{SpanningEdge, Strategy};
    use crate::location::Location;
    use crate::piece::Wires;
    use crate::radius::diameter;
    use crate::side::{Rotation, Side};
    use crate::union_find::Representatives;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn dims(width: usize, height: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    fn build(width: usize, height: usize, strategy: Strategy) -> Grid {
        initialize(width, height, strategy, &mut seeded(0)).unwrap()
    }

    fn assert_links_consistent(grid: &Grid) {
        for piece in grid.pieces() {
            for side in Side::VARIANTS {
                let expected = piece.stubs().get(*side)
                    && piece.neighbor(*side)
                    .and_then(|location| grid.piece(location))
                    .is_some_and(|neighbor| neighbor.stubs().get(side.opposite()));
                assert_eq!(piece.links().get(*side), expected, "{:?} {}", piece.location(), side);

                if let Some(neighbor) = piece.neighbor(*side).and_then(|location| grid.piece(location)) {
                    assert_eq!(piece.links().get(*side), neighbor.links().get(side.opposite()));
                }
            }
        }
    }

    #[test]
    fn neighbors_are_orthogonal_and_bidirectional() {
        let grid = Grid::new(dims(3, 3));

        let corner = grid.piece(Location(0, 0)).unwrap();
        assert_eq!(corner.neighbor(Side::Right), Some(Location(1, 0)));
        assert_eq!(corner.neighbor(Side::Bottom), Some(Location(0, 1)));
        assert_eq!(corner.neighbor(Side::Top), None);
        assert_eq!(corner.neighbor(Side::Left), None);

        let center = grid.piece(Location(1, 1)).unwrap();
        assert_eq!(center.neighbors().count(), 4);

        let far_corner = grid.piece(Location(2, 2)).unwrap();
        assert_eq!(far_corner.neighbors().collect::<Vec<_>>(), vec![(Side::Top, Location(2, 1)), (Side::Left, Location(1, 2))]);

        for piece in grid.pieces() {
            for (side, location) in piece.neighbors() {
                assert_eq!(grid.piece(location).unwrap().neighbor(side.opposite()), Some(piece.location()));
            }
        }

        assert_eq!(grid.source(), Location(0, 0));
        assert!(grid.piece(Location(0, 0)).unwrap().is_source());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            initialize(0, 3, Strategy::Fractal, &mut seeded(0)).unwrap_err(),
            InitError::Configuration(vec![ConfigurationError::NonPositiveDimensions { width: 0, height: 3 }])
        );
        assert!(initialize(4, 0, Strategy::Kruskal, &mut seeded(0)).is_err());
    }

    #[test]
    fn source_off_the_grid_invalidates_builder() {
        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.source(Location(2, 0));

        assert_eq!(builder.is_valid(), Some(&vec![ConfigurationError::SourceOutOfBounds(Location(2, 0))]));
        assert!(matches!(builder.build(&mut seeded(0)), Err(InitError::Configuration(_))));
    }

    #[test]
    fn fractal_four_by_four() {
        let grid = build(4, 4, Strategy::Fractal);

        assert_eq!(grid.node_count(), 16);
        assert_eq!(grid.radius(), 6);
        assert_eq!(grid.powered().len(), 11);
        assert!(grid.spanning_edges().is_empty());
        assert_links_consistent(&grid);

        assert_eq!(format!("{}", grid), "╻╻╷╷
┣┛└┤
┃╻╻│
┗┻┻┛
");
    }

    #[test]
    fn fractal_larger_grids() {
        for (width, height, radius, powered) in [(5, 5, 8, 18), (9, 9, 17, 57), (15, 11, 28, 119), (16, 16, 34, 177), (2, 2, 2, 3)] {
            let grid = build(width, height, Strategy::Fractal);
            assert_eq!(grid.radius(), radius, "{}x{}", width, height);
            assert_eq!(grid.powered().len(), powered, "{}x{}", width, height);
            assert_links_consistent(&grid);
        }
    }

    #[test]
    fn fractal_uneven_and_thin_grids() {
        let cases = [
            (4, 5, 7, 13, "╻╻╷╷\n┃┃││\n┣┛└┤\n┃╻╻│\n┗┻┻┛\n"),
            (6, 3, 7, 12, "╻╻╻╷╷╷\n┣┻┛└┴┤\n┗━━━━┛\n"),
            (1, 5, 3, 4, "╻\n┃\n┃\n┃\n└\n"),
            (5, 1, 1, 1, "╻┬┬─╷\n"),
        ];

        for (width, height, radius, powered, picture) in cases {
            let grid = build(width, height, Strategy::Fractal);
            assert_eq!(grid.radius(), radius, "{}x{}", width, height);
            assert_eq!(grid.powered().len(), powered, "{}x{}", width, height);
            assert_eq!(format!("{}", grid), picture, "{}x{}", width, height);
            assert_links_consistent(&grid);
        }
    }

    #[test]
    fn fractal_with_cycle_is_measured_exactly() {
        // wide and short, so the bottom row closes loops
        let grid = build(7, 2, Strategy::Fractal);
        let graph = grid.link_graph();

        assert!(graph.edge_count() >= graph.node_count());
        assert_eq!(diameter(&graph, grid.source()), 8);
        assert_eq!(grid.radius(), 5);
        assert_eq!(grid.powered().len(), 9);

        assert_eq!(format!("{}", grid), "╻┳┳╻╷╷╷
┗┻┻┻┻┴┘
");
    }

    #[test]
    fn manual_layouts() {
        let grid = build(8, 8, Strategy::Manual);
        assert_eq!(grid.radius(), 8);
        assert_eq!(grid.powered().len(), 24);
        assert_links_consistent(&grid);

        let grid = build(3, 3, Strategy::Manual);
        assert_eq!(grid.radius(), 2);
        assert_eq!(grid.powered().len(), 3);
        assert!(!grid.solved());

        let grid = build(2, 2, Strategy::Manual);
        assert_eq!(grid.piece(Location(0, 0)).unwrap().stubs(), Wires { bottom: true, ..Default::default() });
        assert_eq!(grid.piece(Location(1, 1)).unwrap().stubs(), Wires { top: true, ..Default::default() });
        assert_eq!(grid.radius(), 1);
        assert_eq!(format!("{}", grid), "╻╷
╹╵
");
    }

    #[test]
    fn manual_rotation_joins_top_row() {
        let mut grid = build(2, 2, Strategy::Manual);

        grid.rotate_and_refresh(Location(0, 0), Rotation::CounterClockwise).unwrap();
        let top_left = grid.piece(Location(0, 0)).unwrap();
        assert!(top_left.stubs().right);
        assert!(!top_left.links().right);

        grid.rotate_and_refresh(Location(1, 0), Rotation::Clockwise).unwrap();
        assert!(grid.piece(Location(0, 0)).unwrap().links().right);
        assert!(grid.piece(Location(1, 0)).unwrap().links().left);
        assert!(grid.is_connected(Location(0, 0), Location(1, 0)));
        assert!(grid.is_connected(Location(1, 0), Location(0, 0)));

        assert_eq!(grid.powered(), &HashSet::from([Location(0, 0), Location(1, 0)]));
        assert_eq!(grid.piece(Location(1, 0)).unwrap().distance(), Some(1));
        assert_eq!(grid.piece(Location(0, 1)).unwrap().distance(), None);
        assert_eq!(format!("{}", grid), "╺╸
╵╵
");
    }

    #[test]
    fn empty_layout_powers_only_the_source() {
        let grid = build(3, 3, Strategy::Empty);
        assert_eq!(grid.radius(), 1);
        assert_eq!(grid.powered(), &HashSet::from([Location(0, 0)]));
        assert_eq!(grid.link_graph().node_count(), 9);
        assert_eq!(grid.link_graph().edge_count(), 0);

        assert!(build(1, 1, Strategy::Empty).solved());
    }

    #[test]
    fn quarter_turns() {
        let corner = Wires { top: true, right: true, ..Default::default() };
        assert_eq!(corner.rotated(Rotation::Clockwise), Wires { right: true, bottom: true, ..Default::default() });
        assert_eq!(corner.rotated(Rotation::CounterClockwise), Wires { top: true, left: true, ..Default::default() });

        let stub = Wires { bottom: true, ..Default::default() };
        let turned = stub.rotated(Rotation::Clockwise);
        assert!(!turned.bottom && !turned.right && turned.left);

        assert_eq!(corner.bits(), 0b0011);
        assert_eq!(Wires { left: true, bottom: true, ..Default::default() }.bits(), 0b1100);
    }

    #[test]
    fn four_turns_restore_stubs() {
        let mut grid = GridBuilder::with_dims(dims(5, 4))
            .scramble(true)
            .build(&mut seeded(11))
            .unwrap();
        let before = grid.pieces().map(|piece| piece.stubs()).collect::<Vec<_>>();

        for location in grid.locations().collect::<Vec<_>>() {
            for _ in 0..4 {
                grid.rotate(location, Rotation::Clockwise).unwrap();
            }
            grid.rotate(location, Rotation::CounterClockwise).unwrap();
            grid.rotate(location, Rotation::Clockwise).unwrap();
        }

        assert_eq!(grid.pieces().map(|piece| piece.stubs()).collect::<Vec<_>>(), before);
    }

    #[test]
    fn rotate_out_of_bounds_changes_nothing() {
        let mut grid = build(4, 4, Strategy::Fractal);
        let picture = format!("{}", grid);
        let powered = grid.powered().clone();

        assert_eq!(grid.rotate_and_refresh(Location(4, 0), Rotation::Clockwise).unwrap_err(), InvalidMove::OutOfBounds(Location(4, 0)));
        assert_eq!(grid.rotate(Location(0, 9), Rotation::Clockwise), Err(InvalidMove::OutOfBounds(Location(0, 9))));
        assert_eq!(format!("{}", grid), picture);
        assert_eq!(grid.powered(), &powered);
    }

    #[test]
    fn links_stay_symmetric() {
        for strategy in Strategy::VARIANTS {
            for seed in 0..4 {
                let grid = GridBuilder::with_dims(dims(6, 5))
                    .strategy(*strategy)
                    .scramble(seed % 2 == 1)
                    .build(&mut seeded(seed))
                    .unwrap();
                assert_links_consistent(&grid);
            }
        }
    }

    #[test]
    fn power_grows_with_radius() {
        let mut grid = build(9, 9, Strategy::Fractal);
        let mut previous = HashSet::new();

        for radius in 0..=grid.node_count() {
            grid.radius = radius;
            grid.reset();
            let powered = grid.propagate().clone();
            assert!(previous.is_subset(&powered), "radius {}", radius);
            for location in &powered {
                assert!(grid.piece(*location).unwrap().distance().unwrap() <= radius);
            }
            previous = powered;
        }

        assert!(grid.solved());
    }

    fn assert_power_flags_match(grid: &Grid) {
        for piece in grid.pieces() {
            assert_eq!(piece.is_powered(), grid.powered().contains(&piece.location()), "{:?}", piece.location());
            if !piece.is_powered() {
                assert!(piece.distance().map_or(true, |distance| distance > grid.radius()), "{:?}", piece.location());
            }
        }
    }

    #[test]
    fn propagate_clears_stale_power() {
        let mut grid = build(4, 4, Strategy::Fractal);

        // cuts the source off from the rest of the board
        grid.rotate(Location(0, 0), Rotation::Clockwise).unwrap();
        grid.resolve_connectivity();
        grid.propagate();

        assert_eq!(grid.powered(), &HashSet::from([Location(0, 0)]));
        assert_power_flags_match(&grid);
        assert_eq!(grid.piece(Location(0, 1)).unwrap().distance(), None);

        grid.rotate(Location(0, 0), Rotation::CounterClockwise).unwrap();
        grid.resolve_connectivity();
        grid.propagate();
        assert_eq!(grid.powered().len(), 11);
        assert_power_flags_match(&grid);
    }

    #[test]
    fn propagate_after_bare_source_move() {
        let mut grid = build(5, 5, Strategy::Fractal);

        for side in [Side::Bottom; 4].into_iter().chain([Side::Right; 4]) {
            assert!(grid.move_source(side));
            grid.propagate();
            assert_power_flags_match(&grid);
        }
        assert_eq!(grid.source(), Location(4, 4));
        assert!(!grid.piece(Location(0, 0)).unwrap().is_source());
    }

    #[test]
    fn reset_powers_down() {
        let mut grid = build(4, 4, Strategy::Fractal);
        grid.reset();

        assert!(grid.powered().is_empty());
        assert!(grid.pieces().all(|piece| !piece.is_powered() && piece.distance().is_none()));
    }

    #[test]
    fn move_source_around_four_by_four() {
        let mut grid = build(4, 4, Strategy::Fractal);

        for _ in 0..3 {
            assert!(grid.move_source_and_refresh(Side::Bottom).is_ok());
        }
        // bottom left corner has nothing below it
        assert_eq!(grid.move_source_and_refresh(Side::Bottom).unwrap_err(), InvalidMove::NotLinked(Side::Bottom));
        assert_eq!(grid.source(), Location(0, 3));
        grid.move_source_and_refresh(Side::Right).unwrap();

        assert_eq!(grid.source(), Location(1, 3));
        assert!(grid.piece(Location(1, 3)).unwrap().is_source());
        assert!(!grid.piece(Location(0, 0)).unwrap().is_source());
        assert_eq!(grid.powered().len(), 16);
        assert!(grid.solved());
    }

    #[test]
    fn move_source_around_five_by_five() {
        let mut grid = build(5, 5, Strategy::Fractal);
        let moves = [Side::Bottom; 4].into_iter()
            .chain([Side::Right; 4])
            .chain([Side::Top, Side::Top, Side::Left, Side::Top, Side::Top]);

        for side in moves {
            assert!(grid.move_source(side), "{}", side);
            grid.reset();
            grid.resolve_connectivity();
            grid.propagate();
        }

        assert_eq!(grid.source(), Location(3, 0));
        assert_eq!(grid.radius(), 8);
        assert_eq!(grid.powered().len(), 13);
        assert_eq!(grid.piece(Location(3, 0)).unwrap().distance(), Some(0));
    }

    #[test]
    fn unlinked_move_is_refused() {
        let mut grid = build(4, 4, Strategy::Fractal);
        let powered = grid.powered().clone();

        assert!(!grid.move_source(Side::Right));
        assert!(!grid.move_source(Side::Top));
        assert_eq!(grid.source(), Location(0, 0));
        assert_eq!(grid.powered(), &powered);
    }

    #[test]
    fn builder_places_source() {
        let grid = GridBuilder::with_dims(dims(4, 4))
            .strategy(Strategy::Fractal)
            .source(Location(1, 3))
            .build(&mut seeded(0))
            .unwrap();

        assert_eq!(grid.source(), Location(1, 3));
        assert_eq!(grid.radius(), 6);
        assert!(grid.solved());
    }

    #[test]
    fn edge_counts() {
        for (width, height, count) in [(4, 4, 24), (5, 5, 40), (9, 9, 144), (15, 11, 304), (16, 16, 480), (1, 1, 0)] {
            let grid = Grid::new(dims(width, height));
            let edges = gen_edges(&grid, &mut seeded(3));

            assert_eq!(edges.len(), count, "{}x{}", width, height);
            assert!(edges.iter().all(|edge| edge.weight < grid.node_count() && edge.side().is_some()));
            assert_eq!(edges.iter().collect::<HashSet<_>>().len(), count);
        }
    }

    #[test]
    fn kruskal_yields_spanning_tree() {
        for seed in 0..8 {
            let grid = GridBuilder::with_dims(dims(7, 5)).build(&mut seeded(seed)).unwrap();
            let tree = grid.spanning_edges();
            assert_eq!(tree.len(), grid.node_count() - 1);

            let mut representatives = Representatives::new(grid.locations());
            for edge in tree {
                assert!(representatives.union(edge.ends.0, edge.ends.1), "{:?} closes a cycle", edge);
            }
            assert!(grid.locations().all(|location| representatives.same_component(location, grid.source())));

            // every stub belongs to exactly one tree edge and every stub is live
            let stub_total: usize = grid.pieces().map(|piece| piece.stubs().count()).sum();
            assert_eq!(stub_total, 2 * tree.len());
            assert!(grid.pieces().all(|piece| piece.stubs() == piece.links()));

            let graph = grid.link_graph();
            assert_eq!(graph.edge_count(), tree.len());
            assert_eq!(grid.radius(), diameter(&graph, grid.source()) / 2 + 1);
        }
    }

    #[test]
    fn seeded_builds_are_reproducible() {
        let builder = GridBuilder::with_dims(dims(9, 6)).scramble(true).clone();
        let first = builder.build(&mut seeded(42)).unwrap();
        let second = builder.build(&mut seeded(42)).unwrap();

        assert_eq!(first.spanning_edges(), second.spanning_edges());
        assert_eq!(first.radius(), second.radius());
        assert_eq!(first.powered(), second.powered());
        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn scramble_hides_but_keeps_layout() {
        let plain = GridBuilder::with_dims(dims(6, 6)).build(&mut seeded(5)).unwrap();
        let scrambled = GridBuilder::with_dims(dims(6, 6)).scramble(true).build(&mut seeded(5)).unwrap();

        assert_eq!(plain.spanning_edges(), scrambled.spanning_edges());
        assert_eq!(plain.radius(), scrambled.radius());
        for (a, b) in plain.pieces().zip(scrambled.pieces()) {
            assert_eq!(a.stubs().count(), b.stubs().count());
        }
    }

    #[test]
    fn spanning_tree_needs_enough_edges() {
        let grid = Grid::new(dims(2, 2));
        let edges = vec![
            SpanningEdge { ends: UnorderedPair(Location(0, 0), Location(1, 0)), weight: 1 },
            SpanningEdge { ends: UnorderedPair(Location(0, 0), Location(0, 1)), weight: 0 },
        ];

        assert_eq!(spanning_tree(&grid, edges), Err(GenerationError::EdgesExhausted { accepted: 2, required: 3 }));
    }

    #[test]
    fn spanning_tree_prefers_light_edges() {
        let grid = Grid::new(dims(2, 2));
        let edges = vec![
            SpanningEdge { ends: UnorderedPair(Location(0, 0), Location(1, 0)), weight: 3 },
            SpanningEdge { ends: UnorderedPair(Location(0, 0), Location(0, 1)), weight: 0 },
            SpanningEdge { ends: UnorderedPair(Location(1, 0), Location(1, 1)), weight: 2 },
            SpanningEdge { ends: UnorderedPair(Location(0, 1), Location(1, 1)), weight: 2 },
        ];

        let tree = spanning_tree(&grid, edges).unwrap();
        assert_eq!(tree.iter().map(|edge| edge.weight).collect::<Vec<_>>(), vec![0, 2, 2]);
    }

    #[test]
    fn representatives_merge() {
        let mut representatives = Representatives::new([Location(0, 0), Location(1, 0), Location(2, 0), Location(3, 0)]);

        assert!(representatives.union(Location(0, 0), Location(1, 0)));
        assert!(representatives.union(Location(1, 0), Location(2, 0)));
        assert!(!representatives.union(Location(2, 0), Location(0, 0)));
        assert!(representatives.same_component(Location(0, 0), Location(2, 0)));
        assert!(!representatives.same_component(Location(0, 0), Location(3, 0)));
        assert_eq!(representatives.find(Location(0, 0)), Location(2, 0));
        assert_eq!(representatives.find(Location(5, 5)), Location(5, 5));
    }

    #[test]
    fn diameter_of_small_graphs() {
        let mut path = UnGraphMap::new();
        path.add_edge(Location(0, 0), Location(1, 0), Side::Right);
        path.add_edge(Location(1, 0), Location(2, 0), Side::Right);
        path.add_edge(Location(1, 0), Location(1, 1), Side::Bottom);
        path.add_edge(Location(1, 1), Location(1, 2), Side::Bottom);
        assert_eq!(diameter(&path, Location(0, 0)), 3);

        let mut ring = UnGraphMap::new();
        ring.add_edge(Location(0, 0), Location(1, 0), Side::Right);
        ring.add_edge(Location(1, 0), Location(1, 1), Side::Bottom);
        ring.add_edge(Location(0, 1), Location(1, 1), Side::Right);
        ring.add_edge(Location(0, 0), Location(0, 1), Side::Bottom);
        ring.add_edge(Location(1, 1), Location(2, 1), Side::Right);
        assert_eq!(diameter(&ring, Location(0, 0)), 3);

        let mut lonely = UnGraphMap::<Location, Side>::new();
        lonely.add_node(Location(0, 0));
        assert_eq!(diameter(&lonely, Location(0, 0)), 0);
    }

    #[test]
    fn names_parse() {
        assert_eq!(Strategy::from_str("Fractal"), Ok(Strategy::Fractal));
        assert_eq!(Strategy::from_str("fractals"), Ok(Strategy::Fractal));
        assert_eq!(Strategy::from_str("KRUSKAL"), Ok(Strategy::Kruskal));
        assert!(Strategy::from_str("spiral").is_err());
        assert_eq!(Strategy::Manual.to_string(), "manual");
        assert_eq!(Strategy::default(), Strategy::Kruskal);

        assert_eq!(Side::from_str("up"), Ok(Side::Top));
        assert_eq!(Side::from_str("left"), Ok(Side::Left));
        assert_eq!(Side::Bottom.to_string(), "bottom");
        assert_eq!(Rotation::from_str("ccw"), Ok(Rotation::CounterClockwise));
        assert_eq!(Rotation::CounterClockwise.to_string(), "counter-clockwise");
    }

    #[test]
    fn direction_between_locations() {
        assert_eq!(Side::direction_to(Location(1, 1), Location(1, 0)), Some(Side::Top));
        assert_eq!(Side::direction_to(Location(1, 1), Location(0, 1)), Some(Side::Left));
        assert_eq!(Side::direction_to(Location(0, 0), Location(1, 1)), None);
        assert_eq!(Side::direction_to(Location(0, 0), Location(0, 0)), None);
    }
}
