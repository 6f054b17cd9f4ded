pub mod configuration;

pub mod liquidity {
    pub mod liquidityerror;
    pub mod side;
    pub mod curvecomposer;
    pub mod rangesplitter;
    pub mod binner;

    pub mod component {
        pub mod componentspec;
        pub mod parametriccomponent;
    }

    pub mod profile {
        pub mod profilerequest;
        pub mod profilegenerator;
        pub mod profilemanager;
    }
}

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
        }
    }
    pub mod grid {
        pub mod pricegrid;
    }
}
