use incremental_pathfinding::prelude::*;
use incremental_pathfinding::Point;

/// Resolves a move sequence into the cells it visits, starting after `pos`.
fn walk(mut pos: Point, path: &Path<Dir>) -> Vec<Point> {
    path.iter()
        .map(|&dir| {
            pos = dir.apply(pos, 5, 5).unwrap();
            pos
        })
        .collect()
}

#[test]
fn empty_grid_initial_plan() {
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();
    let path = planner.initial_plan().unwrap();

    // the straight diagonal
    assert_eq!(path.len(), 4);
    assert_eq!(path.cost(), 4);
    assert_eq!(*walk((0, 0), &path).last().unwrap(), (4, 4));
}

#[test]
fn static_obstacle_forces_detour() {
    let blocked = [(2, 2)];
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &blocked).unwrap();
    let path = planner.initial_plan().unwrap();

    // the diagonal is cut, one extra move
    assert_eq!(path.cost(), 5);
    let cells = walk((0, 0), &path);
    assert!(!cells.contains(&(2, 2)));
    assert_eq!(*cells.last().unwrap(), (4, 4));
}

#[test]
fn reroutes_around_new_obstacle() {
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();

    // (2, 2) becomes blocked right after the agent's first step
    let changes = vec![vec![(2, 2)]];

    let mut steps = Vec::new();
    let mut routes = Vec::new();
    planner
        .plan(
            &changes,
            |cell| steps.push(cell),
            |path| routes.push(path.clone()),
        )
        .unwrap();

    assert_eq!(*steps.last().unwrap(), (4, 4));
    assert!(!steps.contains(&(2, 2)));

    // one route per step, extracted from the cell just moved to
    assert_eq!(routes.len(), steps.len());
    for (position, route) in steps.iter().zip(&routes) {
        let cells = walk(*position, route);
        assert!(!cells.contains(&(2, 2)));
    }
}

#[test]
fn unblocking_shortens_route() {
    // column x = 2 is walled except at the bottom, so the initial route has
    // to swing through (2, 4)
    let wall = [(2, 0), (2, 1), (2, 2), (2, 3)];
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 0), "chebyshev", &wall).unwrap();

    let initial = planner.initial_plan().unwrap();
    assert_eq!(initial.cost(), 8);

    // the gap at (2, 2) opens right after the first step
    let changes = vec![vec![(2, 2)]];

    let mut steps = Vec::new();
    let mut route_costs = Vec::new();
    planner
        .plan(
            &changes,
            |cell| steps.push(cell),
            |path| route_costs.push(path.cost()),
        )
        .unwrap();

    // remaining cost after one step would have been 7; the shortcut beats it
    assert!(route_costs[0] < initial.cost() - 1);
    assert_eq!(route_costs[0], 3);
    assert_eq!(steps, vec![(1, 1), (2, 2), (3, 1), (4, 0)]);
}

#[test]
fn start_equals_goal() {
    let mut planner = DStarLite::new((5, 5), (2, 2), (2, 2), "chebyshev", &[]).unwrap();

    let path = planner.initial_plan().unwrap();
    assert!(path.is_empty());
    assert_eq!(path.cost(), 0);

    let mut moves = 0;
    let mut routes = 0;
    planner.plan(&[], |_| moves += 1, |_| routes += 1).unwrap();
    assert_eq!((moves, routes), (0, 0));
}

#[test]
fn enclosed_goal_is_unreachable() {
    let walled_in = [(3, 3), (3, 4), (4, 3)];
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &walled_in).unwrap();

    assert!(matches!(
        planner.initial_plan(),
        Err(PlanningError::Unreachable(_))
    ));
    assert!(matches!(
        planner.plan(&[], |_| {}, |_| {}),
        Err(PlanningError::Unreachable(_))
    ));
}

#[test]
fn walling_off_the_goal_mid_run_fails() {
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();

    // after the first step, every neighbor of the goal goes solid
    let changes = vec![vec![(3, 3), (3, 4), (4, 3)]];

    let mut steps = Vec::new();
    let result = planner.plan(&changes, |cell| steps.push(cell), |_| {});

    assert!(matches!(result, Err(PlanningError::Unreachable(_))));
    assert_eq!(steps.len(), 1);
}

#[test]
fn unknown_heuristic_is_rejected() {
    let result = DStarLite::new((5, 5), (0, 0), (4, 4), "octile", &[]);
    assert_eq!(
        result.err(),
        Some(PlanningError::UnknownHeuristic("octile".to_string()))
    );
}

#[test]
fn out_of_bounds_cells_are_rejected() {
    assert!(matches!(
        DStarLite::new((5, 5), (5, 0), (4, 4), "chebyshev", &[]),
        Err(PlanningError::OutOfBounds { cell: (5, 0), .. })
    ));
    assert!(matches!(
        DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[(9, 9)]),
        Err(PlanningError::OutOfBounds { cell: (9, 9), .. })
    ));
}

#[test]
fn out_of_bounds_toggle_is_rejected() {
    let mut planner = DStarLite::new((5, 5), (0, 0), (4, 4), "chebyshev", &[]).unwrap();
    let changes = vec![vec![(7, 0)]];

    assert!(matches!(
        planner.plan(&changes, |_| {}, |_| {}),
        Err(PlanningError::OutOfBounds { cell: (7, 0), .. })
    ));
}
